use chrono::{NaiveDate, NaiveTime};

use medcat_model::{
    CatalogError, CertificateBuilder, DosageBuilder, MedicineBuilder, PackageBuilder,
    VersionBuilder,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn time(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).expect("valid time")
}

fn complete_certificate() -> CertificateBuilder {
    let mut builder = CertificateBuilder::new();
    builder.set_number(555);
    builder.set_issued(date(2020, 1, 1), time(0, 0, 0));
    builder.set_expires(date(2025, 1, 1), time(0, 0, 0));
    builder.set_registered_organization("Org");
    builder
}

#[test]
fn certificate_builder_finishes_with_split_components() {
    let certificate = complete_certificate().finish().expect("complete");
    assert_eq!(certificate.number, 555);
    assert_eq!(certificate.issued_date, date(2020, 1, 1));
    assert_eq!(certificate.issued_time, time(0, 0, 0));
    assert_eq!(certificate.expires_date, date(2025, 1, 1));
    assert_eq!(certificate.registered_organization, "Org");
}

#[test]
fn certificate_builder_reports_missing_number() {
    let mut builder = CertificateBuilder::new();
    builder.set_issued(date(2020, 1, 1), time(0, 0, 0));
    builder.set_expires(date(2025, 1, 1), time(0, 0, 0));
    builder.set_registered_organization("Org");
    let err = builder.finish().expect_err("number missing");
    assert!(matches!(
        err,
        CatalogError::IncompleteRecord {
            record: "certificate",
            missing: "number",
        }
    ));
}

#[test]
fn version_builder_requires_certificate() {
    let mut package = PackageBuilder::new();
    package.set_package_type("Box");
    package.set_elements_count(10);
    package.set_price(500);

    let mut builder = VersionBuilder::new();
    builder.set_distribution_version("v1");
    builder.set_package(package.finish().expect("complete package"));
    let err = builder.finish().expect_err("certificate missing");
    assert!(matches!(
        err,
        CatalogError::IncompleteRecord {
            record: "version",
            missing: "certificate",
        }
    ));
}

#[test]
fn medicine_builder_defaults_collections_to_empty() {
    let mut builder = MedicineBuilder::new();
    builder.set_id("M7");
    builder.set_name("Ibuprofen");
    builder.set_pharm("NSAID");
    builder.set_group("Analgesic");
    let medicine = builder.finish().expect("complete medicine");
    assert!(medicine.analogs.is_empty());
    assert!(medicine.versions.is_empty());
}

#[test]
fn medicine_builder_keeps_collection_order() {
    let mut package = PackageBuilder::new();
    package.set_package_type("Blister");
    package.set_elements_count(20);
    package.set_price(199);
    let package = package.finish().expect("complete package");

    let mut versions = Vec::new();
    for tag in ["v1", "v2"] {
        let mut version = VersionBuilder::new();
        version.set_distribution_version(tag);
        version.set_certificate(complete_certificate().finish().expect("cert"));
        version.set_package(package.clone());
        versions.push(version.finish().expect("complete version"));
    }

    let mut builder = MedicineBuilder::new();
    builder.set_id("M1");
    builder.set_name("Aspirin");
    builder.set_pharm("P1");
    builder.set_group("G1");
    builder.set_analogs(vec!["A".to_string(), "B".to_string()]);
    builder.set_versions(versions);
    let medicine = builder.finish().expect("complete medicine");

    assert_eq!(medicine.analogs, vec!["A", "B"]);
    assert_eq!(medicine.versions[0].distribution_version, "v1");
    assert_eq!(medicine.versions[1].distribution_version, "v2");
}

#[test]
fn dosage_builder_roundtrips_values() {
    let mut builder = DosageBuilder::new();
    builder.set_description("Take daily");
    builder.set_active_agent(50);
    builder.set_maximum_use_per_day(3);
    let dosage = builder.finish().expect("complete dosage");
    assert_eq!(dosage.description, "Take daily");
    assert_eq!(dosage.active_agent, 50);
    assert_eq!(dosage.maximum_use_per_day, 3);
}

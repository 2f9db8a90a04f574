use std::path::{Path, PathBuf};

use medcat_model::Medicine;

/// Summary of one parsed catalog, ready for rendering.
#[derive(Debug)]
pub struct CatalogReport {
    pub file: PathBuf,
    pub rows: Vec<MedicineSummary>,
}

#[derive(Debug)]
pub struct MedicineSummary {
    pub id: String,
    pub name: String,
    pub group: String,
    pub analogs: usize,
    pub versions: usize,
    pub dosages: usize,
}

impl CatalogReport {
    pub fn new(file: &Path, medicines: &[Medicine]) -> Self {
        let rows = medicines
            .iter()
            .map(|medicine| MedicineSummary {
                id: medicine.id.clone(),
                name: medicine.name.clone(),
                group: medicine.group.clone(),
                analogs: medicine.analogs.len(),
                versions: medicine.versions.len(),
                dosages: medicine
                    .versions
                    .iter()
                    .map(|version| version.dosages.len())
                    .sum(),
            })
            .collect();
        Self {
            file: file.to_path_buf(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcat_model::{MedicineBuilder, VersionBuilder};

    #[test]
    fn report_counts_dosages_across_versions() {
        use chrono::{NaiveDate, NaiveTime};
        use medcat_model::{CertificateBuilder, DosageBuilder, PackageBuilder};

        let mut certificate = CertificateBuilder::new();
        certificate.set_number(1);
        certificate.set_issued(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        );
        certificate.set_expires(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        );
        certificate.set_registered_organization("Org");
        let certificate = certificate.finish().expect("certificate");

        let mut package = PackageBuilder::new();
        package.set_package_type("Box");
        package.set_elements_count(10);
        package.set_price(500);
        let package = package.finish().expect("package");

        let mut dosage = DosageBuilder::new();
        dosage.set_description("daily");
        dosage.set_active_agent(50);
        dosage.set_maximum_use_per_day(3);
        let dosage = dosage.finish().expect("dosage");

        let mut versions = Vec::new();
        for tag in ["v1", "v2"] {
            let mut version = VersionBuilder::new();
            version.set_distribution_version(tag);
            version.set_certificate(certificate.clone());
            version.set_package(package.clone());
            version.set_dosages(vec![dosage.clone(), dosage.clone()]);
            versions.push(version.finish().expect("version"));
        }

        let mut medicine = MedicineBuilder::new();
        medicine.set_id("M1");
        medicine.set_name("Aspirin");
        medicine.set_pharm("P1");
        medicine.set_group("G1");
        medicine.set_versions(versions);
        let medicine = medicine.finish().expect("medicine");

        let report = CatalogReport::new(Path::new("meds.xml"), &[medicine]);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].versions, 2);
        assert_eq!(report.rows[0].dosages, 4);
    }
}

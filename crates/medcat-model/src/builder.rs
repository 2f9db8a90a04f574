//! Value builders for catalog records.
//!
//! One builder per record kind. A builder is a mutable accumulator tied to
//! the lifetime of its open element; `finish()` is the only way to obtain
//! the immutable record and fails with
//! [`CatalogError::IncompleteRecord`] unless every required field was set.
//! Call sites never assemble records by hand, so completeness is enforced
//! in exactly one place.

use chrono::{NaiveDate, NaiveTime};

use crate::catalog::{Certificate, Dosage, Medicine, PackageInfo, Version};
use crate::error::{CatalogError, Result};

fn required<T>(record: &'static str, field: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or(CatalogError::IncompleteRecord {
        record,
        missing: field,
    })
}

/// Accumulator for a [`Medicine`] record.
#[derive(Debug, Default)]
pub struct MedicineBuilder {
    id: Option<String>,
    name: Option<String>,
    pharm: Option<String>,
    group: Option<String>,
    analogs: Vec<String>,
    versions: Vec<Version>,
}

impl MedicineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_pharm(&mut self, pharm: impl Into<String>) {
        self.pharm = Some(pharm.into());
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = Some(group.into());
    }

    pub fn set_analogs(&mut self, analogs: Vec<String>) {
        self.analogs = analogs;
    }

    pub fn set_versions(&mut self, versions: Vec<Version>) {
        self.versions = versions;
    }

    /// Finalize into an immutable [`Medicine`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IncompleteRecord`] when `id`, `name`,
    /// `pharm`, or `group` was never set. The collections default to empty.
    pub fn finish(self) -> Result<Medicine> {
        Ok(Medicine {
            id: required("medicine", "id", self.id)?,
            name: required("medicine", "name", self.name)?,
            pharm: required("medicine", "pharm", self.pharm)?,
            group: required("medicine", "group", self.group)?,
            analogs: self.analogs,
            versions: self.versions,
        })
    }
}

/// Accumulator for a [`Version`] record.
#[derive(Debug, Default)]
pub struct VersionBuilder {
    distribution_version: Option<String>,
    certificate: Option<Certificate>,
    package: Option<PackageInfo>,
    dosages: Vec<Dosage>,
}

impl VersionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_distribution_version(&mut self, tag: impl Into<String>) {
        self.distribution_version = Some(tag.into());
    }

    pub fn set_certificate(&mut self, certificate: Certificate) {
        self.certificate = Some(certificate);
    }

    pub fn set_package(&mut self, package: PackageInfo) {
        self.package = Some(package);
    }

    pub fn set_dosages(&mut self, dosages: Vec<Dosage>) {
        self.dosages = dosages;
    }

    /// Finalize into an immutable [`Version`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IncompleteRecord`] when the distribution
    /// version, certificate, or package is absent.
    pub fn finish(self) -> Result<Version> {
        Ok(Version {
            distribution_version: required(
                "version",
                "distributionVersion",
                self.distribution_version,
            )?,
            certificate: required("version", "certificate", self.certificate)?,
            package: required("version", "package", self.package)?,
            dosages: self.dosages,
        })
    }
}

/// Accumulator for a [`Certificate`] record.
#[derive(Debug, Default)]
pub struct CertificateBuilder {
    number: Option<i64>,
    issued: Option<(NaiveDate, NaiveTime)>,
    expires: Option<(NaiveDate, NaiveTime)>,
    registered_organization: Option<String>,
}

impl CertificateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number(&mut self, number: i64) {
        self.number = Some(number);
    }

    /// Record the issue timestamp, already split into components.
    pub fn set_issued(&mut self, date: NaiveDate, time: NaiveTime) {
        self.issued = Some((date, time));
    }

    /// Record the expiry timestamp, already split into components.
    pub fn set_expires(&mut self, date: NaiveDate, time: NaiveTime) {
        self.expires = Some((date, time));
    }

    pub fn set_registered_organization(&mut self, organization: impl Into<String>) {
        self.registered_organization = Some(organization.into());
    }

    /// Finalize into an immutable [`Certificate`].
    ///
    /// Issue-before-expiry ordering is deliberately not validated.
    pub fn finish(self) -> Result<Certificate> {
        let (issued_date, issued_time) = required("certificate", "issued timestamp", self.issued)?;
        let (expires_date, expires_time) =
            required("certificate", "expiry timestamp", self.expires)?;
        Ok(Certificate {
            number: required("certificate", "number", self.number)?,
            issued_date,
            issued_time,
            expires_date,
            expires_time,
            registered_organization: required(
                "certificate",
                "registered organization",
                self.registered_organization,
            )?,
        })
    }
}

/// Accumulator for a [`PackageInfo`] record.
#[derive(Debug, Default)]
pub struct PackageBuilder {
    package_type: Option<String>,
    elements_count: Option<i32>,
    price: Option<i32>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_package_type(&mut self, package_type: impl Into<String>) {
        self.package_type = Some(package_type.into());
    }

    pub fn set_elements_count(&mut self, count: i32) {
        self.elements_count = Some(count);
    }

    pub fn set_price(&mut self, price: i32) {
        self.price = Some(price);
    }

    /// Finalize into an immutable [`PackageInfo`].
    pub fn finish(self) -> Result<PackageInfo> {
        Ok(PackageInfo {
            package_type: required("package", "type", self.package_type)?,
            elements_count: required("package", "elements count", self.elements_count)?,
            price: required("package", "price", self.price)?,
        })
    }
}

/// Accumulator for a [`Dosage`] record.
#[derive(Debug, Default)]
pub struct DosageBuilder {
    description: Option<String>,
    active_agent: Option<i32>,
    maximum_use_per_day: Option<i32>,
}

impl DosageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn set_active_agent(&mut self, quantity: i32) {
        self.active_agent = Some(quantity);
    }

    pub fn set_maximum_use_per_day(&mut self, count: i32) {
        self.maximum_use_per_day = Some(count);
    }

    /// Finalize into an immutable [`Dosage`].
    pub fn finish(self) -> Result<Dosage> {
        Ok(Dosage {
            description: required("dosage", "description", self.description)?,
            active_agent: required("dosage", "active agent", self.active_agent)?,
            maximum_use_per_day: required("dosage", "maximum use per day", self.maximum_use_per_day)?,
        })
    }
}

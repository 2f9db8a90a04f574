//! Catalog domain records.
//!
//! All records are immutable once finalized; they are assembled through the
//! builders in [`crate::builder`] while their source elements are open, and
//! only a finished record is ever attached to a parent. Collections keep
//! document order.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A medicine entry: the top-level catalog record.
///
/// The `id` attribute is unique within a document by contract; the parser
/// does not enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    /// Document-scoped identifier (the `id` attribute).
    pub id: String,
    /// Trade name.
    pub name: String,
    /// Pharmaceutical class.
    pub pharm: String,
    /// Therapeutic group.
    pub group: String,
    /// Names of analog medicines, in document order.
    pub analogs: Vec<String>,
    /// Distribution versions, in document order.
    pub versions: Vec<Version>,
}

/// One distribution version of a medicine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// The `distributionVersion` attribute.
    pub distribution_version: String,
    /// Registration certificate. Exactly one per version.
    pub certificate: Certificate,
    /// Packaging data. Exactly one per version.
    pub package: PackageInfo,
    /// Dosage entries, in document order. May be empty.
    pub dosages: Vec<Dosage>,
}

/// Registration certificate for a version.
///
/// Issue and expiry arrive on the wire as single combined local timestamps
/// and are stored split into date and time components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub number: i64,
    pub issued_date: NaiveDate,
    pub issued_time: NaiveTime,
    pub expires_date: NaiveDate,
    pub expires_time: NaiveTime,
    /// Organization that registered the certificate.
    pub registered_organization: String,
}

/// Packaging data for a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Package kind, free text (e.g. "Box").
    pub package_type: String,
    /// Number of elements per package.
    pub elements_count: i32,
    /// Price in the smallest currency unit.
    pub price: i32,
}

/// A dosage entry for a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosage {
    /// Free-text description.
    pub description: String,
    /// Active-agent quantity.
    pub active_agent: i32,
    /// Maximum uses per day.
    pub maximum_use_per_day: i32,
}

//! Element and attribute names of the medicines catalog document.
//!
//! Matching is by local name, so a prefixed document (`<med:medicine>`)
//! resolves to the same constants.

/// Catalog root container.
pub const MEDICINES: &str = "medicines";
/// Medicine record element.
pub const MEDICINE: &str = "medicine";
pub const NAME: &str = "name";
pub const PHARM: &str = "pharm";
pub const GROUP: &str = "group";
/// Analog names container.
pub const ANALOGS: &str = "analogs";
pub const ANALOG: &str = "analog";
/// Versions container.
pub const VERSIONS: &str = "versions";
/// Version record element.
pub const VERSION: &str = "version";
/// Certificate record element.
pub const CERTIFICATE: &str = "certificate";
pub const CERTIFICATE_NUMBER: &str = "certificateNumber";
pub const CERTIFICATE_ISSUED_DATE_TIME: &str = "certificateIssuedDateTime";
pub const CERTIFICATE_EXPIRES_DATE_TIME: &str = "certificateExpiresDateTime";
// The element name is misspelled in the wire format itself.
pub const CERTIFICATE_REGISTERED_ORGANIZATION: &str = "certificateRegisteredOrganizaion";
/// Package record element.
pub const PACKAGE: &str = "package";
pub const PACKAGE_TYPE: &str = "packageType";
pub const PACKAGE_ELEMENTS_COUNT_IN: &str = "packageElementsCountIn";
pub const PACKAGE_PRICE: &str = "packagePrice";
/// Dosages container.
pub const DOSAGES: &str = "dosages";
/// Dosage record element.
pub const DOSAGE: &str = "dosage";
pub const DOSAGE_DESCRIPTION: &str = "dosageDescription";
pub const DOSAGE_ACTIVE_AGENT: &str = "dosageActiveAgent";
pub const DOSAGE_MAXIMUM_USE_PER_DAY: &str = "dosageMaximumUsePerDay";

/// Identifier attribute on `<medicine>`.
pub const ATTR_ID: &str = "id";
/// Version tag attribute on `<version>`.
pub const ATTR_DISTRIBUTION_VERSION: &str = "distributionVersion";

pub mod builder;
pub mod catalog;
pub mod error;

pub use builder::{
    CertificateBuilder, DosageBuilder, MedicineBuilder, PackageBuilder, VersionBuilder,
};
pub use catalog::{Certificate, Dosage, Medicine, PackageInfo, Version};
pub use error::{CatalogError, Result};

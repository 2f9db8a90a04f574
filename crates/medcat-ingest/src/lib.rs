//! Medicines catalog XML ingestion.
//!
//! Two readers over the same document grammar:
//!
//! - [`stream`] — the single-pass, non-buffering state machine. The
//!   default; memory use is bounded by nesting depth, not document size.
//! - [`dom`] — a buffered variant that materializes the document tree
//!   first and maps it by lookup.
//!
//! Both produce the same `Vec<Medicine>` for conforming documents and the
//! same [`medcat_model::CatalogError`] taxonomy for failures.
//!
//! # Example
//!
//! ```no_run
//! use medcat_ingest::read_catalog;
//!
//! let medicines = read_catalog("meds.xml").unwrap();
//! println!("{} medicines", medicines.len());
//! ```

pub mod dom;
pub mod source;
pub mod stream;
pub mod tags;
pub mod value;

pub use dom::{read_catalog_buffered, read_catalog_buffered_from};
pub use source::{XmlEvent, XmlSource};
pub use stream::{StreamingCatalogReader, read_catalog, read_catalog_from};

//! Error types for catalog ingestion.
//!
//! Every failure inside the parsers surfaces as one [`CatalogError`], so
//! callers see a uniform contract: resource problems, ill-formed markup,
//! field coercion failures, and incomplete records. All four are terminal
//! for the whole parse; there is no per-record recovery.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Combined error type for catalog parsing.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The input resource could not be opened or read.
    #[error("cannot read catalog source {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not well-formed XML, or its structure makes the
    /// catalog mapping impossible (e.g. a close tag with no open record).
    #[error("malformed catalog document near byte {position}: {message}")]
    MalformedInput { position: u64, message: String },

    /// A leaf value failed coercion into its semantic type.
    #[error("invalid value {value:?} in <{tag}>: {message}")]
    FieldFormat {
        tag: &'static str,
        value: String,
        message: String,
    },

    /// A record closed without all of its required fields.
    #[error("incomplete <{record}> record: missing {missing}")]
    IncompleteRecord {
        record: &'static str,
        missing: &'static str,
    },
}

impl CatalogError {
    /// Build a [`CatalogError::Source`] for the given path.
    pub fn source(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Source {
            path: path.into(),
            source,
        }
    }

    /// Build a [`CatalogError::MalformedInput`] at the given byte position.
    pub fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            position,
            message: message.into(),
        }
    }

    /// Build a [`CatalogError::FieldFormat`] for a leaf element.
    pub fn field_format(
        tag: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::FieldFormat {
            tag,
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

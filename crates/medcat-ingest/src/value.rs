//! Scalar field coercion.
//!
//! Leaf text arrives verbatim from the event source; these helpers turn it
//! into the field's semantic type and attribute failures to the owning
//! element. A coercion failure is fatal to the whole parse: a half-coerced
//! record never reaches its parent.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use medcat_model::{CatalogError, Result};

/// Parse a 32-bit integer field.
pub fn parse_int(tag: &'static str, text: &str) -> Result<i32> {
    text.parse::<i32>()
        .map_err(|error| CatalogError::field_format(tag, text, error.to_string()))
}

/// Parse a 64-bit integer field.
pub fn parse_long(tag: &'static str, text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|error| CatalogError::field_format(tag, text, error.to_string()))
}

/// Parse a combined ISO-8601 local timestamp (`2021-05-01T10:00:00`) and
/// split it into its date and time components.
pub fn parse_date_time(tag: &'static str, text: &str) -> Result<(NaiveDate, NaiveTime)> {
    let stamp = text
        .parse::<NaiveDateTime>()
        .map_err(|error| CatalogError::field_format(tag, text, error.to_string()))?;
    Ok((stamp.date(), stamp.time()))
}

//! Coercion properties for scalar field parsing.

use proptest::prelude::*;

use medcat_ingest::value::{parse_date_time, parse_int, parse_long};
use medcat_model::CatalogError;

proptest! {
    #[test]
    fn int_fields_roundtrip(n in any::<i32>()) {
        let parsed = parse_int("packagePrice", &n.to_string()).expect("numeric text");
        prop_assert_eq!(parsed, n);
    }

    #[test]
    fn long_fields_roundtrip(n in any::<i64>()) {
        let parsed = parse_long("certificateNumber", &n.to_string()).expect("numeric text");
        prop_assert_eq!(parsed, n);
    }

    #[test]
    fn alphabetic_text_never_parses(text in "[a-zA-Z]{1,12}") {
        let err = parse_int("dosageActiveAgent", &text).expect_err("non-numeric");
        prop_assert!(matches!(err, CatalogError::FieldFormat { .. }), "expected FieldFormat error");
    }

    #[test]
    fn timestamps_split_into_components(
        year in 1970i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let text = format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}");
        let (date, time) = parse_date_time("certificateIssuedDateTime", &text)
            .expect("valid combined timestamp");
        prop_assert_eq!(date.to_string(), format!("{year:04}-{month:02}-{day:02}"));
        prop_assert_eq!(time.to_string(), format!("{hour:02}:{minute:02}:{second:02}"));
    }
}

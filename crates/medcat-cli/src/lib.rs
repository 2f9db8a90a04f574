//! CLI library components for the medicines catalog parser.

pub mod logging;

//! CLI argument definitions for the medicines catalog parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "medcat",
    version,
    about = "Medicines catalog parser - read catalog XML into records",
    long_about = "Read a medicines catalog XML document into domain records.\n\n\
                  Offers a single-pass streaming parser (default) and a buffered\n\
                  tree parser; both yield the same records or one diagnosed error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a catalog file and print its records.
    Parse(ParseArgs),

    /// Parse a catalog file and report only success or failure.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Path to the catalog XML file.
    #[arg(value_name = "CATALOG_FILE")]
    pub catalog_file: PathBuf,

    /// Parser implementation to use.
    #[arg(long = "parser", value_enum, default_value = "stream")]
    pub parser: ParserArg,

    /// Output rendering.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the catalog XML file.
    #[arg(value_name = "CATALOG_FILE")]
    pub catalog_file: PathBuf,

    /// Parser implementation to use.
    #[arg(long = "parser", value_enum, default_value = "stream")]
    pub parser: ParserArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParserArg {
    /// Single-pass streaming parser.
    Stream,
    /// Whole-document buffered parser.
    Buffered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Summary table, one row per medicine.
    Table,
    /// Full records as JSON.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use medcat_ingest::{read_catalog, read_catalog_buffered};
use medcat_model::Medicine;

use crate::cli::{CheckArgs, OutputArg, ParseArgs, ParserArg};
use crate::summary::print_summary;
use crate::types::CatalogReport;

pub fn run_parse(args: &ParseArgs) -> Result<()> {
    let medicines = load_catalog(&args.catalog_file, args.parser)?;
    match args.output {
        OutputArg::Table => print_summary(&CatalogReport::new(&args.catalog_file, &medicines)),
        OutputArg::Json => {
            let json =
                serde_json::to_string_pretty(&medicines).context("render records as json")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<usize> {
    let medicines = load_catalog(&args.catalog_file, args.parser)?;
    Ok(medicines.len())
}

/// Parse the catalog with the selected reader. All parser failures arrive
/// as one `CatalogError` and are only annotated with the file name here.
fn load_catalog(path: &Path, parser: ParserArg) -> Result<Vec<Medicine>> {
    let span = info_span!("catalog", file = %path.display());
    let _guard = span.enter();
    let medicines = match parser {
        ParserArg::Stream => read_catalog(path),
        ParserArg::Buffered => read_catalog_buffered(path),
    }
    .with_context(|| format!("parse {}", path.display()))?;
    info!(count = medicines.len(), "catalog parsed");
    Ok(medicines)
}

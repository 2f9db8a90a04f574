use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::types::CatalogReport;

pub fn print_summary(report: &CatalogReport) {
    println!("Catalog: {}", report.file.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Group"),
        header_cell("Analogs"),
        header_cell("Versions"),
        header_cell("Dosages"),
    ]);
    apply_table_style(&mut table);
    for index in 3..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_versions = 0usize;
    let mut total_dosages = 0usize;
    for row in &report.rows {
        total_versions += row.versions;
        total_dosages += row.dosages;
        table.add_row(vec![
            Cell::new(&row.id),
            Cell::new(&row.name),
            Cell::new(&row.group),
            Cell::new(row.analogs),
            Cell::new(row.versions),
            Cell::new(row.dosages),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format!("{} medicines", report.rows.len())),
        Cell::new(""),
        Cell::new(""),
        Cell::new(total_versions),
        Cell::new(total_dosages),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use formulary_cli::pipeline::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("--- PROCESS COMPLETE ---");
    match &summary.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: dry run, nothing written"),
    }
    println!("Vocabulary: {}", summary.vocabulary_version);

    let stats = &summary.stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Empty keys"),
        header_cell("Duplicates"),
        header_cell("Unmatched keys"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new("Template"),
        Cell::new(stats.template_rows),
        count_cell(stats.template_empty_keys, Color::Yellow),
        count_cell(stats.template_duplicates, Color::Yellow),
        count_cell(stats.template_only_keys, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Facility"),
        Cell::new(stats.facility_rows),
        count_cell(stats.facility_empty_keys, Color::Yellow),
        dim_cell("-"),
        count_cell(stats.facility_only_keys, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Matched")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.matched).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    println!(
        "Total medications matched: {} ({} with facility notes)",
        stats.matched, stats.annotated
    );
}

/// Shared style for the smaller listing tables.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! Tables printed by the commands.

use appendix_assembly::AssemblyReport;
use appendix_model::AppendixRegistry;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Plain rows of the appendix table: label, title, pages, file.
pub fn appendix_rows(registry: &AppendixRegistry) -> Vec<[String; 4]> {
    registry
        .iter()
        .map(|entry| {
            [
                entry.default_label().to_string(),
                entry.custom_title().to_string(),
                entry.page_info(),
                entry.file_name(),
            ]
        })
        .collect()
}

pub fn appendix_table(registry: &AppendixRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Label"),
        header_cell("Title"),
        header_cell("Pages"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    for [label, title, pages, file] in appendix_rows(registry) {
        let title_cell = if title == label {
            dim_cell(title)
        } else {
            Cell::new(title)
        };
        table.add_row(vec![
            Cell::new(label)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            title_cell,
            Cell::new(pages),
            Cell::new(file),
        ]);
    }
    table
}

pub fn print_appendices(registry: &AppendixRegistry) {
    if registry.is_empty() {
        println!("No appendices.");
    } else {
        println!("{}", appendix_table(registry));
    }
}

/// Plain rows of the merge statistics: part, title, file, pages.
pub fn report_rows(report: &AssemblyReport) -> Vec<[String; 4]> {
    let mut rows = vec![[
        "Base".to_string(),
        "-".to_string(),
        "-".to_string(),
        report.base_pages.to_string(),
    ]];
    rows.extend(report.appendices.iter().map(|appendix| {
        [
            appendix.label.clone(),
            appendix.title.clone(),
            appendix.file_name.clone(),
            appendix.pages.to_string(),
        ]
    }));
    rows.push([
        "Title pages".to_string(),
        "-".to_string(),
        "-".to_string(),
        report.title_pages.to_string(),
    ]);
    rows
}

pub fn print_report(report: &AssemblyReport) {
    println!("Output: {}", report.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Part"),
        header_cell("Title"),
        header_cell("File"),
        header_cell("Pages"),
    ]);
    apply_summary_table_style(&mut table);
    for row in report_rows(report) {
        table.add_row(row.into_iter().map(|value| {
            if value == "-" {
                dim_cell(value)
            } else {
                Cell::new(value)
            }
        }));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(report.total_pages).add_attribute(Attribute::Bold),
    ]);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    println!("{table}");
}

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
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use epi_cli::types::{ProfileRun, TransformRun};

pub fn print_profile_summary(run: &ProfileRun) {
    println!("Profiling report: {}", run.report_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for outcome in &run.outcomes {
        table.add_row(vec![
            Cell::new(&outcome.name),
            count_cell(outcome.rows),
            count_cell(outcome.columns),
            status_cell(outcome.error.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_transform_summary(run: &TransformRun) {
    println!("Output: {}", run.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for output in &run.tables {
        table.add_row(vec![
            Cell::new(&output.name),
            Cell::new(output.rows),
            Cell::new(output.path.display().to_string()),
        ]);
    }
    println!("{table}");
    for stub in &run.stubs_written {
        println!(
            "Wrote reference template: {} (fill in and re-run)",
            stub.display()
        );
    }
    if run.unresolved_population > 0 {
        println!(
            "Countries without population reference: {}",
            run.unresolved_population
        );
    }
    if run.unresolved_iso > 0 {
        println!("Countries without ISO code: {}", run.unresolved_iso);
    }
}

fn status_cell(error: Option<&str>) -> Cell {
    match error {
        None => Cell::new("ok").fg(Color::Green),
        Some(message) => Cell::new(format!("failed: {message}")).fg(Color::Red),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => Cell::new("-").add_attribute(Attribute::Dim),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kashmir_cli::pipeline::{MatchReport, ProfileReport};
use kashmir_model::{ConfidenceLevel, FrequencyHistogram};

pub fn print_match_report(report: &MatchReport) {
    println!("Source: {}", report.source);
    println!("Target: {}", report.target);
    print_training_line(report.training.instances, report.training.skipped);

    for query in &report.queries {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Target"),
            header_cell("Source"),
            header_cell("Score"),
            header_cell("Confidence"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Center);
        for m in &query.matches {
            table.add_row(vec![
                Cell::new(m.target.as_str())
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(m.source.as_str()),
                Cell::new(format!("{:.4}", m.score)),
                confidence_cell(m.confidence),
            ]);
        }
        println!();
        println!("Query: {}", query.query);
        println!("{table}");
    }
    print_confidence_legend(report);
}

fn print_confidence_legend(report: &MatchReport) {
    let levels = report.confidence_levels();
    if levels.is_empty() {
        return;
    }
    println!();
    for level in levels {
        println!("  {:<6}  {}", confidence_label(level), level.description());
    }
}

pub fn print_profile_report(report: &ProfileReport) {
    println!("Source: {}", report.source);
    print_training_line(report.training.instances, report.training.skipped);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("Distinct"),
        header_cell("Total"),
        header_cell("Histogram"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &report.attributes {
        let histogram_cell = if row.histogram.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(row.histogram.to_string())
        };
        table.add_row(vec![
            Cell::new(&row.attribute)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(row.distinct),
            Cell::new(row.total),
            histogram_cell,
        ]);
    }
    println!("{table}");
}

pub fn print_histogram(histogram: &FrequencyHistogram) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Char"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);
    for (c, n) in histogram.iter() {
        table.add_row(vec![Cell::new(c), Cell::new(n)]);
    }
    println!("{table}");
}

fn print_training_line(instances: usize, skipped: usize) {
    if skipped > 0 {
        println!("Training: {instances} instances ({skipped} skipped)");
    } else {
        println!("Training: {instances} instances");
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_label(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::High => "HIGH",
        ConfidenceLevel::Medium => "MEDIUM",
        ConfidenceLevel::Low => "LOW",
        ConfidenceLevel::NoEvidence => "NONE",
    }
}

fn confidence_cell(level: ConfidenceLevel) -> Cell {
    let label = confidence_label(level);
    match level {
        ConfidenceLevel::High => Cell::new(label)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        ConfidenceLevel::Medium => Cell::new(label).fg(Color::Yellow),
        ConfidenceLevel::Low => Cell::new(label).fg(Color::Red),
        ConfidenceLevel::NoEvidence => dim_cell(label),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

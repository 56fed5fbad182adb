use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lcore_model::{Category, DID_PREFIX, DomainReport, RunReport};
use lcore_standards::PipelineConfig;

use crate::types::{OwnershipOutcome, RunOutcome};

pub fn print_summary(outcome: &RunOutcome) {
    match &outcome.artifacts {
        Some(_) => println!("Output: {}", outcome.output_dir.display()),
        None => println!("Output: dry run, nothing written"),
    }
    println!("Run: {}", outcome.report.generated_at);
    println!("{}", domain_table(&outcome.report));

    println!();
    println!("Device catalog:");
    println!("{}", category_table(outcome));

    if let Some(ownership) = &outcome.ownership {
        println!();
        println!(
            "Ownership: {} of {} wallets own devices, plan {}",
            ownership.wallets_used, ownership.wallets, ownership.plan
        );
        println!("{}", ownership_table(ownership));
    }
    if !outcome.errors.is_empty() {
        eprintln!("Errors:");
        for error in &outcome.errors {
            eprintln!("- {error}");
        }
    }
}

/// Per-domain counts with a totals row.
pub fn domain_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Description"),
        header_cell("Status"),
        header_cell("Input"),
        header_cell("Records"),
        header_cell("Dropped"),
        header_cell("PII cols"),
        header_cell("PII values"),
        header_cell("Devices"),
        header_cell("Violations"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..=9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 2, CellAlignment::Center);

    let mut total_input = 0usize;
    let mut total_devices = 0usize;
    let mut total_violations = 0usize;
    for domain in &report.domains {
        total_input += domain.input_rows;
        total_devices += domain.device_count;
        total_violations += domain.violations.len();
        table.add_row(vec![
            Cell::new(domain.domain)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(domain.domain.description()),
            status_cell(domain),
            Cell::new(domain.input_rows),
            Cell::new(domain.output_rows),
            count_cell(domain.dropped_rows, Color::Yellow),
            Cell::new(domain.pii_columns_removed.len()),
            Cell::new(domain.pii_values_removed),
            Cell::new(domain.device_count),
            count_cell(domain.violations.len(), Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("Accepted domains")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_input).add_attribute(Attribute::Bold),
        Cell::new(report.total_records).add_attribute(Attribute::Bold),
        count_cell(report.total_dropped_rows, Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(report.total_pii_columns_removed).add_attribute(Attribute::Bold),
        Cell::new(report.total_pii_values_removed).add_attribute(Attribute::Bold),
        Cell::new(total_devices).add_attribute(Attribute::Bold),
        count_cell(total_violations, Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

fn category_table(outcome: &RunOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Devices")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for category in Category::ALL {
        let count = outcome.categories.get(&category).copied().unwrap_or_default();
        table.add_row(vec![Cell::new(category.as_str()), count_cell(count, Color::Green)]);
    }
    let total: usize = outcome.categories.values().sum();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    table
}

fn ownership_table(ownership: &OwnershipOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Devices per wallet"), header_cell("Wallets")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (size, wallets) in &ownership.shape {
        table.add_row(vec![Cell::new(size), Cell::new(wallets)]);
    }
    table
}

/// Configured domains with their device prefixes and source files.
pub fn domains_table(config: &PipelineConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Domain", "Description", "Device prefix", "Sources"]);
    apply_table_style(&mut table);
    for domain in &config.domains {
        let sources = domain
            .sources
            .iter()
            .map(|source| format!("{}: {}", source.role, source.file))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            domain.name.to_string(),
            domain.name.description().to_string(),
            format!("{DID_PREFIX}{}", domain.device_prefix),
            sources,
        ]);
    }
    table
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
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(domain: &DomainReport) -> Cell {
    match &domain.failure {
        None => Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(failure) => Cell::new(format!("FAIL ({})", failure.stage))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
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

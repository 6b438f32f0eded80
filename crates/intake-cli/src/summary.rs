use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use intake_model::{ErrorMap, FieldName, OptionCatalog, SubmissionHistory, label_for};
use intake_validate::{FieldRule, Schema};

use intake_cli::replay::{ReplayReport, UnknownOption, display_value};

pub fn print_fields(schema: &Schema) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Visible when"),
        header_cell("Required"),
        header_cell("Checks"),
    ]);
    apply_table_style(&mut table);
    for rule in schema.rules() {
        table.add_row(vec![
            field_cell(rule.field),
            Cell::new(rule.field.label()),
            Cell::new(rule.field.kind().label()),
            rule.visible_when
                .as_ref()
                .map_or_else(|| dim_cell("always"), Cell::new),
            requirement_cell(rule),
            checks_cell(rule),
        ]);
    }
    println!("{table}");
}

pub fn print_errors(errors: &ErrorMap) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Error")]);
    apply_table_style(&mut table);
    for (field, message) in errors.iter() {
        table.add_row(vec![field_cell(field), Cell::new(message).fg(Color::Red)]);
    }
    println!("{table}");
}

pub fn print_unknown_options(unknown: &[UnknownOption]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Unknown option")]);
    apply_table_style(&mut table);
    for entry in unknown {
        table.add_row(vec![
            field_cell(entry.field),
            Cell::new(&entry.value).fg(Color::Red),
        ]);
    }
    println!("{table}");
}

pub fn print_report(report: &ReplayReport, schema: &Schema, catalog: &OptionCatalog) {
    let snapshot = &report.snapshot;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Visible"),
        header_cell("Required"),
        header_cell("Touched"),
        header_cell("Error"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    for rule in schema.rules() {
        let field = rule.field;
        let value = snapshot.values.get(field);
        let value_cell = if value.is_unset() {
            dim_cell("-")
        } else {
            Cell::new(display_value(value))
        };
        let error_cell = match snapshot.errors.get(field) {
            Some(message) if snapshot.visible_errors.contains(field) => {
                Cell::new(message).fg(Color::Red)
            }
            Some(message) => dim_cell(message),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            field_cell(field),
            value_cell,
            flag_cell(snapshot.visibility.is_visible(field)),
            flag_cell(snapshot.required.contains(&field)),
            flag_cell(snapshot.touched.get(&field).copied().unwrap_or(false)),
            error_cell,
        ]);
    }
    println!("{table}");

    if !report.rejected.is_empty() {
        println!("Rejected actions:");
        for rejected in &report.rejected {
            println!("- #{} {}: {}", rejected.index, rejected.field, rejected.reason);
        }
    }
    if !report.failed_submits.is_empty() {
        println!("Blocked submits: {}", report.failed_submits.len());
    }
    print_history(&report.history, catalog);
}

fn print_history(history: &SubmissionHistory, catalog: &OptionCatalog) {
    if history.is_empty() {
        println!("History: empty");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Id"),
        header_cell("Submitted at"),
        header_cell("Full name"),
        header_cell("Email"),
        header_cell("Country"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, submission) in history.iter().enumerate() {
        let values = submission.values();
        let country = values.text(FieldName::Country);
        table.add_row(vec![
            Cell::new(index),
            Cell::new(submission.id()).fg(Color::Blue),
            Cell::new(submission.submitted_at().to_rfc3339()),
            Cell::new(values.text(FieldName::FullName)),
            Cell::new(values.text(FieldName::Email)),
            Cell::new(label_for(&catalog.countries, country).unwrap_or(country)),
        ]);
    }
    println!("History (newest first):");
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn requirement_cell(rule: &FieldRule) -> Cell {
    match &rule.requirement {
        None => dim_cell("no"),
        Some(requirement) => match &requirement.when {
            None => Cell::new("yes").fg(Color::Yellow),
            Some(condition) => Cell::new(format!("when {condition}")).fg(Color::Yellow),
        },
    }
}

fn checks_cell(rule: &FieldRule) -> Cell {
    if rule.checks.is_empty() {
        return dim_cell("-");
    }
    let checks: Vec<String> = rule.checks.iter().map(|check| check.check.to_string()).collect();
    Cell::new(checks.join(", "))
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn field_cell(field: FieldName) -> Cell {
    Cell::new(field)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

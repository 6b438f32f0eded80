use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use intake_model::{FieldName, FormSettings, FormValues, OptionCatalog, SelectOption};
use intake_validate::standard_schema;

use intake_cli::replay::{check_values, new_session, replay};
use intake_cli::script::Script;

use crate::cli::{CheckArgs, OutputArg, ReplayArgs};
use crate::summary::{
    apply_table_style, header_cell, print_errors, print_fields, print_report,
    print_unknown_options,
};

/// Settings from `--config`, or the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<FormSettings> {
    match path {
        Some(path) => FormSettings::load(path)
            .with_context(|| format!("load settings {}", path.display())),
        None => Ok(FormSettings::default()),
    }
}

pub fn run_fields(settings: &FormSettings) -> Result<()> {
    let _span = info_span!("fields").entered();
    let schema = standard_schema(settings).context("build schema")?;
    print_fields(&schema);
    Ok(())
}

pub fn run_options(settings: &FormSettings, field: Option<&str>) -> Result<()> {
    let _span = info_span!("options").entered();
    let catalog = &settings.catalog;
    let Some(name) = field else {
        for field in FieldName::ALL {
            if field.kind().has_options() {
                print_field_options(catalog, field);
            }
        }
        return Ok(());
    };

    let field: FieldName = name.parse()?;
    if !field.kind().has_options() {
        bail!("{field} is a free text field and has no options");
    }
    print_field_options(catalog, field);
    Ok(())
}

/// Returns whether the document is free of errors and unknown options.
pub fn run_check(settings: &FormSettings, args: &CheckArgs) -> Result<bool> {
    let span = info_span!("check", path = %args.values.display());
    let _guard = span.enter();
    let text = fs::read_to_string(&args.values)
        .with_context(|| format!("read values {}", args.values.display()))?;
    let values: FormValues = serde_json::from_str(&text)
        .with_context(|| format!("parse values {}", args.values.display()))?;

    let report = check_values(settings, &values)?;
    info!(
        error_count = report.errors.len(),
        unknown_options = report.unknown_options.len(),
        "values checked"
    );
    if report.is_clean() {
        println!("No errors.");
        return Ok(true);
    }
    if !report.errors.is_empty() {
        print_errors(&report.errors);
    }
    if !report.unknown_options.is_empty() {
        print_unknown_options(&report.unknown_options);
    }
    Ok(false)
}

pub fn run_replay(settings: &FormSettings, args: &ReplayArgs) -> Result<()> {
    let span = info_span!("replay", path = %args.script.display());
    let _guard = span.enter();
    let script = Script::load(&args.script)?;
    let mut session = new_session(settings, args.deterministic)?;
    let report = replay(&mut session, &script)?;
    info!(
        actions = script.actions.len(),
        rejected = report.rejected.len(),
        submissions = report.history.len(),
        "replay finished"
    );

    match args.output {
        OutputArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
        OutputArg::Table => print_report(&report, session.schema(), session.catalog()),
    }
    Ok(())
}

fn print_field_options(catalog: &OptionCatalog, field: FieldName) {
    match field {
        FieldName::Category => print_option_table(field.label(), &catalog.categories),
        FieldName::Country => print_option_table(field.label(), &catalog.countries),
        FieldName::Interests => print_option_table(field.label(), &catalog.interests),
        FieldName::State => {
            for (country, states) in &catalog.states {
                print_option_table(&format!("{} ({country})", field.label()), states);
            }
        }
        _ => {}
    }
}

fn print_option_table(title: &str, options: &[SelectOption]) {
    println!("{title}");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Label")]);
    apply_table_style(&mut table);
    for option in options {
        table.add_row(vec![option.value.as_str(), option.label.as_str()]);
    }
    println!("{table}");
}

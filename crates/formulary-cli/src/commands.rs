use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};

use formulary_cli::pipeline::{RunConfig, RunError, RunSummary, load_normalizer, run_reconcile};
use formulary_model::ReconcileOptions;
use formulary_normalize::NoiseVocabulary;

use crate::cli::{ColumnArgs, NormalizeArgs, ReconcileArgs, VocabularyArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

fn reconcile_options(columns: &ColumnArgs) -> ReconcileOptions {
    let mut options = ReconcileOptions::default();
    if let Some(name) = &columns.template_name {
        options = options.with_template_name_column(name.as_str());
    }
    if let Some(name) = &columns.restriction {
        options = options.with_restriction_column(name.as_str());
    }
    if let Some(name) = &columns.facility_name {
        options = options.with_facility_name_column(name.as_str());
    }
    if let Some(name) = &columns.facility_note {
        options = options.with_facility_note_column(name.as_str());
    }
    options
}

pub fn run_reconcile_command(args: &ReconcileArgs) -> Result<RunSummary, RunError> {
    let config = RunConfig {
        template: args.template.clone(),
        facility: args.facility.clone(),
        output: args.output.clone(),
        vocabulary: args.vocabulary.clone(),
        options: reconcile_options(&args.columns),
        dry_run: args.dry_run,
    };
    run_reconcile(&config)
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<()> {
    let normalizer = load_normalizer(args.vocabulary.as_deref()).context("load vocabulary")?;
    let mut table = Table::new();
    if args.explain {
        table.set_header(vec![
            header_cell("Name"),
            header_cell("Pass"),
            header_cell("Rule"),
            header_cell("Output"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for name in &args.names {
            table.add_row(vec![name.clone(), String::new(), String::new(), String::new()]);
            for step in normalizer.trace(name) {
                table.add_row(vec![
                    String::new(),
                    step.pass.to_string(),
                    step.rule.to_string(),
                    step.output,
                ]);
            }
        }
    } else {
        table.set_header(vec![header_cell("Name"), header_cell("Key")]);
        apply_table_style(&mut table);
        for name in &args.names {
            let key = normalizer.normalize(name);
            if key.is_empty() {
                table.add_row(vec![Cell::new(name), dim_cell("(empty)")]);
            } else {
                table.add_row(vec![Cell::new(name), Cell::new(key)]);
            }
        }
    }
    println!("{table}");
    Ok(())
}

pub fn run_vocabulary(args: &VocabularyArgs) -> Result<()> {
    let vocabulary = match &args.vocabulary {
        Some(path) => NoiseVocabulary::from_json_path(path)?,
        None => NoiseVocabulary::builtin(),
    };
    println!("Vocabulary version: {}", vocabulary.version);
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Term")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, term) in vocabulary.terms.iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), term.clone()]);
    }
    println!("{table}");
    Ok(())
}

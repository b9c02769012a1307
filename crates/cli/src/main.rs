mod render;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use instrumentation_core::{derive_fields, parse_str, to_pretty_json};
use instrumentation_diagnostics as diag;
use instrumentation_labels::LabelTable;
use serde::Serialize;

use crate::render::{Format, print_summary, render_diagnostics_pretty};

/// Display name for the field text in span-annotated diagnostics.
const FIELD_SOURCE_NAME: &str = "<field>";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "instr",
    version,
    about = "Instrumentation facet toolchain — parse catalog instrumentation fields and derive search facets"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse an instrumentation field and print the sorted alternative groups.
    Parse {
        /// The raw instrumentation field, e.g. "cl(3)|cl(2), hrn".
        field: String,
    },

    /// Derive the three output columns from an instrumentation field.
    Derive {
        /// The raw instrumentation field, e.g. "cl(3)|cl(2), hrn".
        field: String,
        /// Path to a JSON label table ({"cl": "clarinet", ...}). When
        /// omitted, codes pass through as their own labels, with warnings.
        #[arg(long)]
        labels: Option<String>,
    },

    /// Explain a diagnostic ID (e.g. INS2101).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse { field } => cmd_parse(&field, format),
        Cmd::Derive { field, labels } => cmd_derive(&field, labels.as_deref(), format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

// ── Subcommands ─────────────────────────────────────────────────────────

fn cmd_parse(field: &str, format: Format) -> Result<()> {
    let result = parse_str(field);
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => {
            println!("{}", to_pretty_json(&result.parsed));
            render_diagnostics_pretty(&field.to_lowercase(), FIELD_SOURCE_NAME, &result.diagnostics);
            print_summary(&result.diagnostics);
        }
    }
    Ok(())
}

fn cmd_derive(field: &str, labels: Option<&str>, format: Format) -> Result<()> {
    let table = load_labels(labels)?;
    let result = derive_fields(field, &table);
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => {
            println!("instrumentation_dictionary: {}", result.fields.dictionary);
            println!(
                "instrumentation_dictionary_full: {}",
                result.fields.dictionary_full
            );
            println!(
                "instrumentation_dictionary_full_with_alt: {}",
                result.fields.dictionary_full_with_alt
            );
            render_diagnostics_pretty(&field.to_lowercase(), FIELD_SOURCE_NAME, &result.diagnostics);
            print_summary(&result.diagnostics);
        }
    }
    Ok(())
}

/// JSON envelope for `explain` output.
#[derive(Serialize)]
struct Explanation<'a> {
    id: &'a str,
    explanation: &'a str,
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    let Some(explanation) = diag::explain(id) else {
        eprintln!("no explanation for diagnostic ID {id:?}");
        process::exit(1);
    };
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&Explanation { id, explanation })?);
        }
        Format::Pretty => {
            println!("{id}: {explanation}");
        }
    }
    Ok(())
}

// ── Label table loading ─────────────────────────────────────────────────

fn load_labels(path: Option<&str>) -> Result<LabelTable> {
    match path {
        Some(p) => {
            let json =
                fs::read_to_string(p).with_context(|| format!("reading label table {p}"))?;
            LabelTable::from_json(&json).with_context(|| format!("parsing label table {p}"))
        }
        None => Ok(LabelTable::empty()),
    }
}

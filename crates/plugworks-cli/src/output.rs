//! Report formatting shared by the CLI commands.
//!
//! Commands print either a human-readable table or JSON, selected with the
//! global `--format` flag. Status lines carry a leading mark so a verify
//! run reads as a checklist.

use serde::Serialize;
use tabled::{Table, Tabled};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table for terminals.
    #[default]
    Table,
    /// Pretty-printed JSON for scripts.
    Json,
}

/// Prints a list of rows in the selected format.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("No results found."),
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Json => match serde_json::to_string_pretty(rows) {
            Ok(json) => println!("{json}"),
            Err(_) => println!("[]"),
        },
    }
}

/// Prints a passing status line.
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Prints a warning status line.
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Prints a failing status line. Failures share stdout with the passing
/// lines so a verify run stays one readable checklist.
pub fn print_error(msg: &str) {
    println!("✗ {msg}");
}

/// Prints an indented `key: value` summary line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {value}", format!("{key}:"));
}

//! Output rendering for the CLI.
//!
//! Each listable entity declares its own table row via [`Listable`];
//! structured formats serialize the domain type itself, so `--output
//! json` exposes every field even where the table view abbreviates.

use std::io::{self, IsTerminal, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// A domain type the CLI can print as a collection.
pub trait Listable: serde::Serialize {
    type Row: Tabled;

    /// The abbreviated table row for this entity.
    fn row(&self) -> Self::Row;

    /// The identifier emitted by `--output plain`, one per line.
    fn id(&self) -> String;
}

/// Render a collection in the selected format.
pub fn render_list<T: Listable>(format: &OutputFormat, data: &[T]) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<T::Row> = data.iter().map(Listable::row).collect();
            Table::new(&rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => to_json(data, false),
        OutputFormat::JsonCompact => to_json(data, true),
        OutputFormat::Yaml => to_yaml(data),
        OutputFormat::Plain => data
            .iter()
            .map(Listable::id)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Structured-format helpers ────────────────────────────────────────

pub fn to_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("serialization failed: {e}"))
}

pub fn to_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("serialization failed: {e}"))
}

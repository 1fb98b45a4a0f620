//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use content_core::types::RowView;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One content row as shown in table output.
#[derive(Debug, Serialize, Tabled)]
pub struct ContentRow {
    #[tabled(rename = "row")]
    pub row_id: u32,
    #[tabled(rename = "")]
    pub checked: String,
    pub name: String,
    pub size: String,
    pub progress: String,
    pub priority: String,
    pub remaining: String,
    pub availability: String,
}

impl ContentRow {
    pub fn from_view(row: &RowView) -> Self {
        let marker = if row.is_folder { "/" } else { "" };
        Self {
            row_id: row.row_id.get(),
            checked: checkbox(row.checked),
            name: format!("{}{}{marker}", "  ".repeat(row.depth as usize), row.name),
            size: friendly_size(row.size),
            progress: format!("{:.1}%", row.progress),
            priority: row.priority.to_string(),
            remaining: friendly_size(row.remaining),
            availability: format!("{:.3}", row.availability),
        }
    }
}

fn checkbox(state: content_core::types::TriState) -> String {
    use content_core::types::TriState;
    match state {
        TriState::Checked => "[x]",
        TriState::Unchecked => "[ ]",
        TriState::Partial => "[-]",
    }
    .to_string()
}

/// Format a byte count with binary units and one decimal.
pub fn friendly_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Print content rows, as a table or as raw row views.
pub fn print_rows(rows: &[RowView], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let lines: Vec<ContentRow> = rows.iter().map(ContentRow::from_view).collect();
            print_list(&lines, format);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No rows.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_size() {
        assert_eq!(friendly_size(0), "0 B");
        assert_eq!(friendly_size(1023), "1023 B");
        assert_eq!(friendly_size(1536), "1.5 KiB");
        assert_eq!(friendly_size(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}

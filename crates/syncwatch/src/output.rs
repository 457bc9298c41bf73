//! Terminal output formatting

use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use syncwatch_core::{LogCatalog, LogEntry, StatusColor, SyncStatus};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

#[derive(Tabled)]
pub struct CatalogRow {
    #[tabled(rename = "key")]
    pub key: String,
    #[tabled(rename = "log")]
    pub label: String,
    #[tabled(rename = "size")]
    pub size: String,
    #[tabled(rename = "updated")]
    pub updated: String,
    #[tabled(rename = "path")]
    pub path: String,
}

impl From<&LogEntry> for CatalogRow {
    fn from(entry: &LogEntry) -> Self {
        let meta = std::fs::metadata(&entry.path).ok();

        CatalogRow {
            key: entry.key.clone(),
            label: entry.label.clone(),
            size: meta
                .as_ref()
                .map(|m| format_bytes(m.len()))
                .unwrap_or_else(|| "-".to_string()),
            updated: meta
                .and_then(|m| m.modified().ok())
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "n/a".to_string()),
            path: entry.path.display().to_string(),
        }
    }
}

pub fn print_catalog(catalog: &LogCatalog) {
    if is_json_mode() {
        print_json(catalog);
        return;
    }

    if catalog.is_empty() {
        println!("No valid log files found or access denied.");
        return;
    }

    let rows: Vec<CatalogRow> = catalog.iter().map(CatalogRow::from).collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Colored badge text for a status
pub fn format_status(status: &SyncStatus) -> String {
    let label = status.label.as_str();
    match status.color {
        StatusColor::Yellow => label.yellow().to_string(),
        StatusColor::Red => label.red().bold().to_string(),
        StatusColor::Green => label.green().to_string(),
        StatusColor::Blue => label.blue().to_string(),
    }
}

pub fn print_status(status: &SyncStatus) {
    if is_json_mode() {
        print_json(status);
        return;
    }

    println!("{} {}", "Sync status:".bold(), format_status(status));
    if let Some(error) = &status.error {
        print_error(error);
    }
}

#[derive(Serialize)]
struct TailJson<'a> {
    key: &'a str,
    content: &'a str,
}

pub fn print_tail(key: &str, content: &str) {
    if is_json_mode() {
        print_json(&TailJson { key, content });
        return;
    }

    if !content.is_empty() {
        println!("{}", content);
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1}G", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1}M", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.0}K", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

//! Dashboard view model

use chrono::{DateTime, Local};
use serde::Serialize;
use syncwatch_core::{normalize_log_key, LogCatalog, SyncStatus};
use syncwatch_health::StatusMonitor;
use syncwatch_logs::LogRegistry;

/// Shown instead of log content when nothing was discovered
pub const EMPTY_CATALOG_NOTICE: &str = "No valid log files found or access denied.";

/// Everything the dashboard page renders
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub logs: LogCatalog,
    pub selected: Option<String>,
    pub content: Option<String>,
    /// Modification time of the selected file
    pub updated: Option<String>,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Build the dashboard from freshly scanned state
///
/// Both caches are cleared first so a page view always reflects the disk.
pub fn build_dashboard(
    registry: &LogRegistry,
    monitor: &StatusMonitor,
    requested: Option<&str>,
    lines: usize,
) -> Dashboard {
    monitor.clear_cache();
    registry.clear_cache();

    let logs = registry.get_catalog();
    let status = monitor.get_status();

    let requested = requested.map(normalize_log_key);
    let entry = requested
        .as_deref()
        .and_then(|key| logs.get(key))
        .or_else(|| logs.first())
        .cloned();

    let Some(entry) = entry else {
        return Dashboard {
            logs,
            selected: None,
            content: None,
            updated: None,
            status,
            notice: Some(EMPTY_CATALOG_NOTICE.to_string()),
        };
    };

    let content = registry.tail(&entry.path, lines);
    let updated = std::fs::metadata(&entry.path)
        .and_then(|m| m.modified())
        .ok()
        .map(|t| {
            DateTime::<Local>::from(t)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        });

    Dashboard {
        logs,
        selected: Some(entry.key),
        content: Some(content),
        updated,
        status,
        notice: None,
    }
}

//! Core types for SyncWatch

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Normalize a caller-supplied log key: lowercase, only `[a-z0-9_-]` kept
pub fn normalize_log_key(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            (c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-').then_some(c)
        })
        .collect()
}

/// A resolved, currently valid log source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Stable identifier, e.g. `apache-error`
    pub key: String,
    /// Display name
    pub label: String,
    /// Absolute path that passed validation when the catalog was built
    pub path: PathBuf,
}

impl LogEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Point-in-time snapshot of resolved logs, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogCatalog {
    entries: Vec<LogEntry>,
}

impl LogCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; a later entry with the same key replaces the earlier one in place
    pub fn insert(&mut self, entry: LogEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Keep only entries matching the predicate
    pub fn retain<F: FnMut(&LogEntry) -> bool>(&mut self, f: F) {
        self.entries.retain(f);
    }

    pub fn get(&self, key: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Byte-for-byte path membership
    pub fn contains_path(&self, path: &Path) -> bool {
        self.entries
            .iter()
            .any(|e| e.path.as_os_str() == path.as_os_str())
    }

    pub fn first(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LogCatalog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Coarse sync health derived from the status file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncState {
    Initializing,
    Disabled,
    Error,
    Completed,
    Enabled,
    Running,
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Initializing => "Initializing",
            SyncState::Disabled => "Disabled",
            SyncState::Error => "Error",
            SyncState::Completed => "Completed",
            SyncState::Enabled => "Enabled",
            SyncState::Running => "Running",
        }
    }
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Badge color for a sync state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Yellow,
    Red,
    Green,
    Blue,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Yellow => "yellow",
            StatusColor::Red => "red",
            StatusColor::Green => "green",
            StatusColor::Blue => "blue",
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub label: SyncState,
    pub color: StatusColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncStatus {
    pub fn new(label: SyncState, color: StatusColor) -> Self {
        Self {
            label,
            color,
            error: None,
        }
    }

    pub fn initializing() -> Self {
        Self::new(SyncState::Initializing, StatusColor::Yellow)
    }

    /// Status file could not be trusted
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            label: SyncState::Error,
            color: StatusColor::Red,
            error: Some(message.into()),
        }
    }
}

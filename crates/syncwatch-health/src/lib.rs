//! SyncWatch Health
//!
//! Classifies the single-line status file written by the sync process into
//! a coarse health state for the dashboard badge.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use syncwatch_core::cache::{get_typed, set_typed};
use syncwatch_core::{
    Cache, Config, Error, Result, StatusColor, SyncState, SyncStatus, CACHE_NAMESPACE,
    STATUS_CACHE_KEY,
};
use tracing::{debug, warn};

/// Classification rules, checked in order against the status prefix
pub const STATUS_RULES: &[(&str, SyncState, StatusColor)] = &[
    ("sync disabled", SyncState::Disabled, StatusColor::Red),
    ("sync error", SyncState::Error, StatusColor::Red),
    ("sync completed", SyncState::Completed, StatusColor::Green),
    ("sync enabled", SyncState::Enabled, StatusColor::Green),
    ("sync running", SyncState::Running, StatusColor::Blue),
];

/// Classify one status line
///
/// Only the text before the first colon is considered, so a trailing
/// timestamp such as `sync completed: Wed Jan 1` does not affect the result.
pub fn classify(line: &str) -> SyncStatus {
    let line = line.trim().to_lowercase();
    let prefix = line.split(':').next().unwrap_or_default();

    STATUS_RULES
        .iter()
        .find(|(pattern, _, _)| prefix.contains(pattern))
        .map(|&(_, label, color)| SyncStatus::new(label, color))
        .unwrap_or_else(SyncStatus::initializing)
}

/// Reads and caches the sync status
pub struct StatusMonitor {
    status_file: PathBuf,
    max_bytes: u64,
    ttl: Duration,
    cache: Arc<dyn Cache>,
}

impl StatusMonitor {
    pub fn new(config: &Config, cache: Arc<dyn Cache>) -> Self {
        Self {
            status_file: config.paths.status_file.clone(),
            max_bytes: config.limits.status_max_bytes,
            ttl: config.cache.status_ttl(),
            cache,
        }
    }

    /// Current status, from cache when fresh
    pub fn get_status(&self) -> SyncStatus {
        if let Some(status) =
            get_typed::<SyncStatus>(self.cache.as_ref(), STATUS_CACHE_KEY, CACHE_NAMESPACE)
        {
            return status;
        }

        let status = self.read_status();
        set_typed(
            self.cache.as_ref(),
            STATUS_CACHE_KEY,
            &status,
            CACHE_NAMESPACE,
            self.ttl,
        );
        status
    }

    /// Read the status file without touching the cache
    pub fn read_status(&self) -> SyncStatus {
        read_status_file(&self.status_file, self.max_bytes)
    }

    /// Drop the cached status so the next read hits the file
    pub fn clear_cache(&self) {
        self.cache.delete(STATUS_CACHE_KEY, CACHE_NAMESPACE);
    }

    pub fn status_file(&self) -> &Path {
        &self.status_file
    }
}

fn read_status_file(path: &Path, max_bytes: u64) -> SyncStatus {
    match read_status_line(path, max_bytes) {
        Ok(Some(line)) => classify(&line),
        Ok(None) => SyncStatus::initializing(),
        Err(e) => {
            warn!("Status file {}: {}", path.display(), e);
            status_for_error(&e)
        }
    }
}

/// First line of the status file, or `None` when there is nothing to classify
fn read_status_line(path: &Path, max_bytes: u64) -> Result<Option<String>> {
    let meta = match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta,
        _ => {
            debug!("Status file {} not present", path.display());
            return Ok(None);
        }
    };

    let file = File::open(path).map_err(|_| Error::Unreadable(path.to_path_buf()))?;

    if meta.len() > max_bytes {
        return Err(Error::InvalidStatus(format!(
            "{} bytes exceeds {}",
            meta.len(),
            max_bytes
        )));
    }

    first_line(BufReader::new(file))
}

fn first_line<R: BufRead>(mut reader: R) -> Result<Option<String>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}

/// Unusable status sources are reported as an error badge
fn status_for_error(e: &Error) -> SyncStatus {
    match e {
        Error::Unreadable(_) => SyncStatus::error("Status file not accessible"),
        Error::InvalidStatus(_) => SyncStatus::error(e.user_message()),
        _ => SyncStatus::error("Status read error"),
    }
}

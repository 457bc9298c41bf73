//! Constants and default values for SyncWatch

use std::path::PathBuf;

/// Config directory name under the user config dir
pub const SYNCWATCH_DIR: &str = "syncwatch";

/// Default config file name
pub const CONFIG_FILE: &str = "config.toml";

/// Primary (sync-enabled) storage root
pub const DEFAULT_LIVE_ROOT: &str = "/homelive";

/// Secondary storage root
pub const DEFAULT_HOME_ROOT: &str = "/home";

/// Status file written by the sync process
pub const DEFAULT_STATUS_FILE: &str = "/home/syncstatus";

/// Cache namespace shared by every component
pub const CACHE_NAMESPACE: &str = "syncwatch";

/// Cache key for the resolved log catalog
pub const CATALOG_CACHE_KEY: &str = "whitelisted_logs";

/// Cache key for the sync status
pub const STATUS_CACHE_KEY: &str = "sync_status";

/// Catalog cache lifetime in seconds
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 60;

/// Status cache lifetime in seconds
pub const DEFAULT_STATUS_TTL_SECS: u64 = 30;

/// Largest file admitted to the catalog (50MB)
pub const DEFAULT_CATALOG_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Largest file served for download (10MB)
pub const DEFAULT_DOWNLOAD_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Largest status file that will be parsed (4KB)
pub const DEFAULT_STATUS_MAX_BYTES: u64 = 4096;

/// Files up to this size are tailed with a single read
pub const TAIL_WHOLE_FILE_MAX_BYTES: u64 = 8192;

/// Chunk size for backward tail reads
pub const TAIL_CHUNK_BYTES: u64 = 4096;

/// Chunk size for streamed downloads
pub const DOWNLOAD_CHUNK_BYTES: usize = 8192;

/// Lower bound for tail line requests
pub const TAIL_MIN_LINES: usize = 1;

/// Upper bound for tail line requests
pub const TAIL_MAX_LINES: usize = 1000;

/// Lines shown on the dashboard
pub const DASHBOARD_TAIL_LINES: usize = 500;

/// Default HTTP bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:8470";

/// Get the default config file path
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SYNCWATCH_DIR)
        .join(CONFIG_FILE)
}

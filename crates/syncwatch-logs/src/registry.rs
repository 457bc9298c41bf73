//! Log registry: resolves, validates, and caches the log catalog

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use syncwatch_core::cache::{get_typed, set_typed};
use syncwatch_core::{
    Cache, Config, Error, LimitsConfig, LogCatalog, LogEntry, Result, CACHE_NAMESPACE,
    CATALOG_CACHE_KEY,
};
use tracing::{debug, warn};

use crate::candidates::{default_specs, CandidateSpec, Resolver};
use crate::reader::LogReader;
use crate::resolve::{collect_runs, first_existing, latest_run, readable_file};

/// A catalog entry cleared for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub path: PathBuf,
    /// Base name used for the attachment
    pub file_name: String,
    pub size: u64,
}

/// Discovers which logs exist and serves bounded reads of them
pub struct LogRegistry {
    specs: Vec<CandidateSpec>,
    limits: LimitsConfig,
    ttl: Duration,
    cache: Arc<dyn Cache>,
}

impl LogRegistry {
    /// Registry over the standard log layout
    pub fn new(config: &Config, cache: Arc<dyn Cache>) -> Self {
        Self::with_specs(
            default_specs(&config.paths),
            config.limits.clone(),
            config.cache.catalog_ttl(),
            cache,
        )
    }

    pub fn with_specs(
        specs: Vec<CandidateSpec>,
        limits: LimitsConfig,
        ttl: Duration,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            specs,
            limits,
            ttl,
            cache,
        }
    }

    /// Current catalog, from cache when fresh
    pub fn get_catalog(&self) -> LogCatalog {
        if let Some(catalog) =
            get_typed::<LogCatalog>(self.cache.as_ref(), CATALOG_CACHE_KEY, CACHE_NAMESPACE)
        {
            return catalog;
        }

        let catalog = self.build_catalog();
        set_typed(
            self.cache.as_ref(),
            CATALOG_CACHE_KEY,
            &catalog,
            CACHE_NAMESPACE,
            self.ttl,
        );
        catalog
    }

    /// Scan the filesystem without touching the cache
    pub fn build_catalog(&self) -> LogCatalog {
        let mut catalog = LogCatalog::new();

        for spec in &self.specs {
            match self.resolve(spec) {
                Some(path) => {
                    debug!("Resolved {} -> {}", spec.key, path.display());
                    catalog.insert(LogEntry::new(spec.key, spec.label, path));
                }
                None => debug!("No candidate found for {}", spec.key),
            }
        }

        // Files may have changed since they were resolved
        let max = self.limits.catalog_max_bytes;
        catalog.retain(|entry| match readable_file(&entry.path) {
            Some(meta) if meta.len() <= max => true,
            Some(meta) => {
                debug!(
                    "Dropping {}: {} bytes exceeds {}",
                    entry.key,
                    meta.len(),
                    max
                );
                false
            }
            None => {
                debug!("Dropping {}: no longer readable", entry.key);
                false
            }
        });

        catalog
    }

    fn resolve(&self, spec: &CandidateSpec) -> Option<PathBuf> {
        match &spec.resolver {
            Resolver::Fixed(candidates) => first_existing(candidates, spec.skip_empty),
            Resolver::LatestRun { patterns, fallback } => {
                let runs = collect_runs(patterns);
                match latest_run(&runs) {
                    Some(path) => Some(path.to_path_buf()),
                    None => first_existing(fallback, spec.skip_empty),
                }
            }
        }
    }

    /// Last lines of a catalog path, or a typed failure
    ///
    /// Paths outside the current catalog are rejected before any
    /// filesystem access.
    pub fn try_tail(&self, path: &Path, max_lines: usize) -> Result<String> {
        if !self.get_catalog().contains_path(path) {
            return Err(Error::not_found(path.display().to_string()));
        }

        LogReader::new(path.to_path_buf()).tail(max_lines)
    }

    /// Last lines of a catalog path, with failures rendered as display text
    pub fn tail(&self, path: &Path, max_lines: usize) -> String {
        render_tail(path, self.try_tail(path, max_lines))
    }

    /// Tail a log by key
    pub fn tail_key(&self, key: &str, max_lines: usize) -> Result<String> {
        let path = self
            .get_catalog()
            .get(key)
            .map(|entry| entry.path.clone())
            .ok_or_else(|| Error::not_found(key))?;
        self.try_tail(&path, max_lines)
    }

    /// Validate a key for download against the catalog and the download cap
    pub fn prepare_download(&self, key: &str) -> Result<Download> {
        let catalog = self.get_catalog();
        let entry = catalog.get(key).ok_or_else(|| Error::not_found(key))?;

        let meta =
            readable_file(&entry.path).ok_or_else(|| Error::Unreadable(entry.path.clone()))?;

        let size = meta.len();
        if size > self.limits.download_max_bytes {
            return Err(Error::TooLarge {
                path: entry.path.clone(),
                size,
                limit: self.limits.download_max_bytes,
            });
        }

        let file_name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.log", entry.key));

        Ok(Download {
            path: entry.path.clone(),
            file_name,
            size,
        })
    }

    /// Drop the cached catalog so the next read rescans
    pub fn clear_cache(&self) {
        self.cache.delete(CATALOG_CACHE_KEY, CACHE_NAMESPACE);
    }
}

fn render_tail(path: &Path, result: Result<String>) -> String {
    match result {
        Ok(content) => content,
        Err(e) => {
            if let Error::IoError(_) = e {
                warn!("Error reading {}: {}", path.display(), e);
            }
            e.user_message().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::tail_from;
    use std::fs::{self, File};
    use std::io::Cursor;
    use std::time::SystemTime;
    use syncwatch_core::{MemoryCache, PathsConfig};
    use tempfile::TempDir;

    const MIB: u64 = 1024 * 1024;

    struct Fixture {
        _dir: TempDir,
        live: PathBuf,
        home: PathBuf,
        registry: LogRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let live = dir.path().join("homelive");
            let home = dir.path().join("home");
            fs::create_dir_all(&live).unwrap();
            fs::create_dir_all(&home).unwrap();

            let mut config = Config::default();
            config.paths = PathsConfig {
                live_root: live.clone(),
                home_root: home.clone(),
                status_file: home.join("syncstatus"),
            };
            let registry = LogRegistry::new(&config, Arc::new(MemoryCache::new()));

            Self {
                _dir: dir,
                live,
                home,
                registry,
            }
        }

        fn write(&self, path: &Path, content: &str) -> PathBuf {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
            path.to_path_buf()
        }

        fn write_sized(&self, path: &Path, size: u64) -> PathBuf {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            File::create(path).unwrap().set_len(size).unwrap();
            path.to_path_buf()
        }

        fn set_mtime(&self, path: &Path, secs: u64) {
            let file = File::options().write(true).open(path).unwrap();
            file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
                .unwrap();
        }
    }

    #[test]
    fn test_empty_roots_give_empty_catalog() {
        let fx = Fixture::new();
        assert!(fx.registry.get_catalog().is_empty());
    }

    #[test]
    fn test_prefers_first_candidate() {
        let fx = Fixture::new();
        let live = fx.write(&fx.live.join("LogFiles/sync/apache2/error.log"), "live");
        fx.write(&fx.home.join("LogFiles/sync/apache2/error.log"), "home");

        let catalog = fx.registry.get_catalog();
        let entry = catalog.get("apache-error").unwrap();
        assert_eq!(entry.path, live);
        assert_eq!(entry.label, "Apache Error");
    }

    #[test]
    fn test_falls_back_to_second_root() {
        let fx = Fixture::new();
        let home = fx.write(&fx.home.join("LogFiles/sync/apache2/access.log"), "x");

        let catalog = fx.registry.get_catalog();
        assert_eq!(catalog.get("apache-access").unwrap().path, home);
    }

    #[test]
    fn test_supervisord_prefers_home_root() {
        let fx = Fixture::new();
        let home = fx.write(&fx.home.join("LogFiles/supervisord.log"), "home");
        fx.write(&fx.live.join("LogFiles/supervisord.log"), "live");

        let catalog = fx.registry.get_catalog();
        assert_eq!(catalog.get("supervisord").unwrap().path, home);
    }

    #[test]
    fn test_cron_skips_empty_placeholder() {
        let fx = Fixture::new();
        fx.write(&fx.live.join("LogFiles/sync/cron.log"), "");
        let real = fx.write(&fx.home.join("LogFiles/cron.log"), "job ran\n");

        let catalog = fx.registry.get_catalog();
        assert_eq!(catalog.get("cron").unwrap().path, real);
    }

    #[test]
    fn test_cron_only_empty_is_omitted() {
        let fx = Fixture::new();
        fx.write(&fx.live.join("LogFiles/sync/cron.log"), "");

        assert!(!fx.registry.get_catalog().contains_key("cron"));
    }

    #[test]
    fn test_empty_non_cron_log_is_kept() {
        let fx = Fixture::new();
        let path = fx.write(&fx.live.join("LogFiles/sync/unison.log"), "");

        let catalog = fx.registry.get_catalog();
        assert_eq!(catalog.get("sync").unwrap().path, path);
    }

    #[test]
    fn test_catalog_follows_declaration_order() {
        let fx = Fixture::new();
        fx.write(&fx.home.join("LogFiles/supervisord.log"), "s");
        fx.write(&fx.home.join("LogFiles/sync/apache2/access.log"), "a");
        fx.write(&fx.home.join("LogFiles/cron.log"), "c");

        let catalog = fx.registry.get_catalog();
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["apache-access", "cron", "supervisord"]);
    }

    #[test]
    fn test_sync_init_picks_newest_run() {
        let fx = Fixture::new();
        let old = fx.write(&fx.home.join("LogFiles/sync/runs/sync-init-1.log"), "old");
        let new = fx.write(&fx.live.join("LogFiles/sync/runs/sync-init-2.log"), "new");
        let err = fx.write(
            &fx.home.join("LogFiles/sync/runs/sync-init-error-3.log"),
            "err",
        );
        fx.set_mtime(&old, 1_000);
        fx.set_mtime(&new, 3_000);
        fx.set_mtime(&err, 2_000);

        let catalog = fx.registry.get_catalog();
        assert_eq!(catalog.get("sync-init").unwrap().path, new);
        assert_eq!(catalog.get("sync-init-error").unwrap().path, err);
        assert_eq!(catalog.get("sync-init-error").unwrap().label, "Sync Init (stderr)");
    }

    #[test]
    fn test_sync_init_glob_includes_error_runs() {
        let fx = Fixture::new();
        let err = fx.write(
            &fx.home.join("LogFiles/sync/runs/sync-init-error-1.log"),
            "err",
        );

        let catalog = fx.registry.get_catalog();
        assert_eq!(catalog.get("sync-init").map(|e| e.path.clone()), Some(err.clone()));
        assert_eq!(catalog.get("sync-init-error").map(|e| e.path.clone()), Some(err.clone()));

        // A newer stderr run also wins the sync-init key
        let run = fx.write(&fx.live.join("LogFiles/sync/runs/sync-init-7.log"), "run");
        fx.set_mtime(&run, 1_000);
        fx.set_mtime(&err, 2_000);
        fx.registry.clear_cache();
        assert_eq!(fx.registry.get_catalog().get("sync-init").unwrap().path, err);
    }

    #[test]
    fn test_sync_init_falls_back_to_legacy_paths() {
        let fx = Fixture::new();
        let legacy = fx.write(&fx.home.join("LogFiles/sync-init.log"), "legacy");

        let catalog = fx.registry.get_catalog();
        assert_eq!(catalog.get("sync-init").unwrap().path, legacy);
        assert!(!catalog.contains_key("sync-init-error"));
    }

    #[test]
    fn test_oversized_file_is_dropped() {
        let fx = Fixture::new();
        fx.write_sized(&fx.live.join("LogFiles/sync/apache2/error.log"), 50 * MIB + 1);
        let ok = fx.write_sized(&fx.home.join("LogFiles/sync/apache2/access.log"), 50 * MIB);

        let catalog = fx.registry.get_catalog();
        assert!(!catalog.contains_key("apache-error"));
        assert_eq!(catalog.get("apache-access").unwrap().path, ok);
    }

    #[test]
    fn test_catalog_is_cached_until_cleared() {
        let fx = Fixture::new();
        let path = fx.write(&fx.home.join("LogFiles/cron.log"), "x\n");
        assert!(fx.registry.get_catalog().contains_key("cron"));

        fs::remove_file(&path).unwrap();
        fx.write(&fx.home.join("LogFiles/supervisord.log"), "s");
        let cached = fx.registry.get_catalog();
        assert!(cached.contains_key("cron"));
        assert!(!cached.contains_key("supervisord"));

        fx.registry.clear_cache();
        let fresh = fx.registry.get_catalog();
        assert!(!fresh.contains_key("cron"));
        assert!(fresh.contains_key("supervisord"));
    }

    #[test]
    fn test_catalog_rebuilds_after_ttl() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("a.log");
        let specs = vec![CandidateSpec::fixed("a", "A", vec![log.clone()])];
        let registry = LogRegistry::with_specs(
            specs,
            LimitsConfig::default(),
            Duration::from_millis(20),
            Arc::new(MemoryCache::new()),
        );

        assert!(registry.get_catalog().is_empty());
        fs::write(&log, "x").unwrap();
        std::thread::sleep(Duration::from_millis(50));
        assert!(registry.get_catalog().contains_key("a"));
    }

    #[test]
    fn test_tail_rejects_path_outside_catalog() {
        let fx = Fixture::new();
        fx.write(&fx.home.join("LogFiles/cron.log"), "x\n");
        let outside = fx.write(&fx.home.join("secret.txt"), "secret");

        assert_eq!(
            fx.registry.tail(&outside, 10),
            "Access denied: Invalid log file."
        );
        assert_eq!(
            fx.registry.tail(Path::new("/nonexistent/file.log"), 10),
            "Access denied: Invalid log file."
        );
    }

    #[test]
    fn test_tail_requires_exact_path() {
        let fx = Fixture::new();
        let path = fx.write(&fx.home.join("LogFiles/cron.log"), "x\n");
        let dotted = fx.home.join("LogFiles/./cron.log");
        assert_eq!(path, dotted);

        assert!(matches!(
            fx.registry.try_tail(&dotted, 10),
            Err(Error::NotFound(_))
        ));
        assert_eq!(fx.registry.try_tail(&path, 10).unwrap(), "x");
    }

    #[test]
    fn test_tail_of_vanished_file_is_unreadable() {
        let fx = Fixture::new();
        let path = fx.write(&fx.home.join("LogFiles/cron.log"), "x\n");
        assert!(fx.registry.get_catalog().contains_key("cron"));

        fs::remove_file(&path).unwrap();
        assert_eq!(
            fx.registry.tail(&path, 10),
            "Log not readable or does not exist."
        );
    }

    #[test]
    fn test_mid_read_failure_renders_read_error() {
        // Source shorter than its reported size, as after a truncation
        let mut truncated = Cursor::new(vec![b'x'; 100]);
        let result = tail_from(&mut truncated, 9000, 10);
        assert!(matches!(result, Err(Error::IoError(_))));

        assert_eq!(
            render_tail(Path::new("/home/LogFiles/cron.log"), result),
            "Error reading log file."
        );
        assert_eq!(
            render_tail(Path::new("/home/LogFiles/cron.log"), Ok("a\nb".into())),
            "a\nb"
        );
    }

    #[test]
    fn test_tail_key() {
        let fx = Fixture::new();
        fx.write(&fx.home.join("LogFiles/cron.log"), "a\nb\nc\n");

        assert_eq!(fx.registry.tail_key("cron", 2).unwrap(), "b\nc");
        assert!(matches!(
            fx.registry.tail_key("apache-error", 2),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_download_limits_differ_from_display() {
        let fx = Fixture::new();
        // 11 MiB of 8-byte lines
        let content = "logline\n".repeat((11 * MIB / 8) as usize);
        let path = fx.write(&fx.home.join("LogFiles/sync/apache2/error.log"), &content);

        assert!(fx.registry.get_catalog().contains_key("apache-error"));
        assert_eq!(
            fx.registry.try_tail(&path, 3).unwrap(),
            "logline\nlogline\nlogline"
        );

        match fx.registry.prepare_download("apache-error") {
            Err(Error::TooLarge { size, limit, .. }) => {
                assert_eq!(size, 11 * MIB);
                assert_eq!(limit, 10 * MIB);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_prepare_download() {
        let fx = Fixture::new();
        let path = fx.write(&fx.home.join("LogFiles/sync/apache2/error.log"), "downloaded");

        let download = fx.registry.prepare_download("apache-error").unwrap();
        assert_eq!(download.path, path);
        assert_eq!(download.file_name, "error.log");
        assert_eq!(download.size, 10);

        assert!(matches!(
            fx.registry.prepare_download("php-error"),
            Err(Error::NotFound(_))
        ));
    }
}

//! Static candidate locations for each known log

use std::path::{Path, PathBuf};
use syncwatch_core::PathsConfig;

/// How a log key is turned into a concrete path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolver {
    /// First existing candidate, most preferred first
    Fixed(Vec<PathBuf>),
    /// Newest file matching any pattern; `fallback` is used when nothing matches
    LatestRun {
        patterns: Vec<String>,
        fallback: Vec<PathBuf>,
    },
}

/// Candidate configuration for one log key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub resolver: Resolver,
    /// Treat zero-byte candidates as absent
    pub skip_empty: bool,
}

impl CandidateSpec {
    pub fn fixed(key: &'static str, label: &'static str, paths: Vec<PathBuf>) -> Self {
        Self {
            key,
            label,
            resolver: Resolver::Fixed(paths),
            skip_empty: false,
        }
    }

    pub fn latest_run(
        key: &'static str,
        label: &'static str,
        patterns: Vec<String>,
        fallback: Vec<PathBuf>,
    ) -> Self {
        Self {
            key,
            label,
            resolver: Resolver::LatestRun { patterns, fallback },
            skip_empty: false,
        }
    }

    pub fn skip_empty(mut self) -> Self {
        self.skip_empty = true;
        self
    }
}

/// Glob pattern for per-run files under `root`; the root itself is matched literally
fn runs_pattern(root: &Path, file_glob: &str) -> String {
    let root = glob::Pattern::escape(&root.to_string_lossy());
    format!("{}/LogFiles/sync/runs/{}", root.trim_end_matches('/'), file_glob)
}

/// The known logs in display order
pub fn default_specs(paths: &PathsConfig) -> Vec<CandidateSpec> {
    let live = paths.live_root.join("LogFiles");
    let home = paths.home_root.join("LogFiles");
    let live_sync = live.join("sync");
    let home_sync = home.join("sync");

    vec![
        CandidateSpec::fixed(
            "apache-access",
            "Apache Access",
            vec![
                live_sync.join("apache2/access.log"),
                home_sync.join("apache2/access.log"),
            ],
        ),
        CandidateSpec::fixed(
            "apache-error",
            "Apache Error",
            vec![
                live_sync.join("apache2/error.log"),
                home_sync.join("apache2/error.log"),
            ],
        ),
        CandidateSpec::fixed(
            "php-error",
            "PHP Error",
            vec![
                live_sync.join("apache2/php-error.log"),
                home_sync.join("apache2/php-error.log"),
            ],
        ),
        // A 0B file on the snapshot root must not mask the live cron log
        CandidateSpec::fixed(
            "cron",
            "Cron",
            vec![
                live_sync.join("cron.log"),
                home_sync.join("cron.log"),
                home.join("cron.log"),
            ],
        )
        .skip_empty(),
        CandidateSpec::fixed(
            "sync",
            "Sync",
            vec![live_sync.join("unison.log"), home_sync.join("unison.log")],
        ),
        CandidateSpec::fixed(
            "supervisord",
            "Supervisord",
            vec![home.join("supervisord.log"), live.join("supervisord.log")],
        ),
        // The sync-init glob also matches sync-init-error-* runs
        CandidateSpec::latest_run(
            "sync-init",
            "Sync Init",
            vec![
                runs_pattern(&paths.home_root, "sync-init-*.log"),
                runs_pattern(&paths.live_root, "sync-init-*.log"),
            ],
            vec![live.join("sync-init.log"), home.join("sync-init.log")],
        ),
        CandidateSpec::latest_run(
            "sync-init-error",
            "Sync Init (stderr)",
            vec![
                runs_pattern(&paths.home_root, "sync-init-error-*.log"),
                runs_pattern(&paths.live_root, "sync-init-error-*.log"),
            ],
            vec![
                live.join("sync-init-error.log"),
                home.join("sync-init-error.log"),
            ],
        ),
    ]
}

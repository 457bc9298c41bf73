//! Filesystem probing and candidate resolution

use std::fs::{self, File, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// A per-run log file and its modification time
pub type RunFile = (PathBuf, SystemTime);

/// Metadata for `path` if it is a regular file we can open for reading
pub(crate) fn readable_file(path: &Path) -> Option<Metadata> {
    let meta = fs::metadata(path).ok()?;
    if !meta.is_file() {
        return None;
    }
    File::open(path).ok()?;
    Some(meta)
}

/// First candidate that is a readable regular file
pub(crate) fn first_existing(candidates: &[PathBuf], skip_empty: bool) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|path| match readable_file(path) {
            Some(meta) if skip_empty && meta.len() == 0 => {
                debug!("Skipping empty placeholder {}", path.display());
                false
            }
            Some(_) => true,
            None => false,
        })
        .cloned()
}

/// Newest file by modification time; ties keep the earliest entry
pub fn latest_run(runs: &[RunFile]) -> Option<&Path> {
    let mut best: Option<&RunFile> = None;
    for run in runs {
        match best {
            Some((_, mtime)) if run.1 <= *mtime => {}
            _ => best = Some(run),
        }
    }
    best.map(|(path, _)| path.as_path())
}

/// Readable files matching `patterns`, in pattern order
pub(crate) fn collect_runs(patterns: &[String]) -> Vec<RunFile> {
    let mut runs: Vec<RunFile> = Vec::new();
    for pattern in patterns {
        let paths = match glob::glob(pattern) {
            Ok(paths) => paths,
            Err(e) => {
                debug!("Invalid glob pattern '{}': {}", pattern, e);
                continue;
            }
        };

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    debug!("Glob entry error: {}", e);
                    continue;
                }
            };

            if runs.iter().any(|(seen, _)| seen == &path) {
                continue;
            }

            if let Some(meta) = readable_file(&path) {
                let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                runs.push((path, mtime));
            }
        }
    }
    runs
}

//! Download command implementation

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, Read};
use syncwatch_core::{normalize_log_key, Config};
use tracing::debug;

use crate::cli::DownloadArgs;
use crate::output::print_success;

pub fn execute(config: &Config, args: DownloadArgs) -> Result<()> {
    let key = normalize_log_key(&args.key);
    let registry = super::components(config).registry;

    let download = match registry.prepare_download(&key) {
        Ok(download) => download,
        Err(e) => {
            debug!("Download of {} refused: {}", key, e);
            bail!(e.user_message())
        }
    };

    let output = args
        .output
        .unwrap_or_else(|| download.file_name.clone().into());

    let source = File::open(&download.path)
        .with_context(|| format!("Failed to open {}", download.path.display()))?;
    let mut target = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    // Copy no more than the size that passed the download check
    let copied = io::copy(&mut source.take(download.size), &mut target)?;

    print_success(&format!(
        "Saved {} ({} bytes) to {}",
        download.file_name,
        copied,
        output.display()
    ));
    Ok(())
}

//! Status command implementation

use anyhow::Result;
use syncwatch_core::Config;
use tracing::debug;

use crate::output::print_status;

pub fn execute(config: &Config) -> Result<()> {
    let monitor = super::components(config).monitor;
    debug!("Reading sync status from {}", monitor.status_file().display());

    print_status(&monitor.get_status());
    Ok(())
}

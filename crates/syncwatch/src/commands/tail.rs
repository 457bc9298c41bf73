//! Tail command implementation

use anyhow::{bail, Result};
use syncwatch_core::{normalize_log_key, Config};
use tracing::debug;

use crate::cli::TailArgs;
use crate::output::print_tail;

pub fn execute(config: &Config, args: TailArgs) -> Result<()> {
    let key = normalize_log_key(&args.key);
    let registry = super::components(config).registry;

    match registry.tail_key(&key, args.lines) {
        Ok(content) => {
            print_tail(&key, &content);
            Ok(())
        }
        Err(e) => {
            debug!("Tail of {} failed: {}", key, e);
            bail!(e.user_message())
        }
    }
}

//! List command implementation

use anyhow::Result;
use syncwatch_core::Config;

use crate::output::print_catalog;

pub fn execute(config: &Config) -> Result<()> {
    let catalog = super::components(config).registry.get_catalog();
    print_catalog(&catalog);
    Ok(())
}

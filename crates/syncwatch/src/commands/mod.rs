//! Command implementations

pub mod download;
pub mod list;
pub mod serve;
pub mod status;
pub mod tail;

use std::sync::Arc;
use syncwatch_core::{Cache, Config, MemoryCache};
use syncwatch_health::StatusMonitor;
use syncwatch_logs::LogRegistry;

/// Components for a single command run
pub struct Components {
    pub registry: LogRegistry,
    pub monitor: StatusMonitor,
}

pub fn components(config: &Config) -> Components {
    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    Components {
        registry: LogRegistry::new(config, Arc::clone(&cache)),
        monitor: StatusMonitor::new(config, cache),
    }
}

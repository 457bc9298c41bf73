//! SyncWatch Core - Shared types, configuration, caching, and error handling

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use cache::{Cache, MemoryCache};
pub use config::*;
pub use constants::*;
pub use error::{Error, Result};
pub use types::*;

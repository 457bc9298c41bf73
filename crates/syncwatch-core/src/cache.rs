//! Key/value cache with per-entry time-to-live
//!
//! Components never hold cached state themselves; they are handed an
//! `Arc<dyn Cache>` and read through it. Values are stored as JSON so any
//! serialisable snapshot can be cached.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache collaborator shared by the registry and the status monitor
pub trait Cache: Send + Sync {
    /// Fetch a live entry; expired entries are misses
    fn get(&self, key: &str, namespace: &str) -> Option<Value>;

    /// Store an entry, replacing any previous value
    fn set(&self, key: &str, value: Value, namespace: &str, ttl: Duration);

    /// Evict an entry so the next `get` misses
    fn delete(&self, key: &str, namespace: &str);
}

/// Typed read through a [`Cache`]; undecodable entries count as misses
pub fn get_typed<T: DeserializeOwned>(cache: &dyn Cache, key: &str, namespace: &str) -> Option<T> {
    let value = cache.get(key, namespace)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!("Discarding undecodable cache entry {}/{}: {}", namespace, key, e);
            None
        }
    }
}

/// Typed write through a [`Cache`]
pub fn set_typed<T: Serialize>(
    cache: &dyn Cache,
    key: &str,
    value: &T,
    namespace: &str,
    ttl: Duration,
) {
    match serde_json::to_value(value) {
        Ok(v) => cache.set(key, v, namespace, ttl),
        Err(e) => debug!("Not caching {}/{}: {}", namespace, key, e),
    }
}

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-process cache; last writer wins
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<(String, String), CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str, namespace: &str) -> Option<Value> {
        let map_key = (namespace.to_string(), key.to_string());
        {
            let entries = self.entries.read();
            match entries.get(&map_key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired
        self.entries.write().remove(&map_key);
        None
    }

    fn set(&self, key: &str, value: Value, namespace: &str, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .write()
            .insert((namespace.to_string(), key.to_string()), entry);
    }

    fn delete(&self, key: &str, namespace: &str) {
        self.entries
            .write()
            .remove(&(namespace.to_string(), key.to_string()));
    }
}

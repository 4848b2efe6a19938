//! Short-lived cache of page data keyed by dashboard path.
//!
//! List and detail pages store what they fetched under their request path;
//! mutating services invalidate the affected paths so the next render
//! refetches. Expired entries are purged on every insert and the number of
//! live entries is capped, oldest first.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    value: serde_json::Value,
}

pub const DEFAULT_MAX_ENTRIES: usize = 512;

#[derive(Debug)]
pub struct PageCache {
    ttl: Duration,
    max_entries: usize,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl PageCache {
    /// A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            max_entries: DEFAULT_MAX_ENTRIES,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Caps the number of stored entries; a zero cap disables caching.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.entries();
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            entries.remove(key);
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn insert<T: Serialize>(&self, key: &str, value: &T) {
        if self.ttl.is_zero() || self.max_entries == 0 {
            return;
        }
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to cache page data for {key}: {err}");
                return;
            }
        };

        let now = Instant::now();
        let mut entries = self.entries();
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);
        if !entries.contains_key(key) {
            Self::evict_oldest(&mut entries, self.max_entries - 1);
        }
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: now,
                value,
            },
        );
    }

    /// Drops the oldest entries until at most `keep` remain.
    fn evict_oldest(entries: &mut HashMap<String, CacheEntry>, keep: usize) {
        while entries.len() > keep {
            let Some(victim) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            entries.remove(&victim);
            log::debug!("Evicted cached page {victim} over capacity");
        }
    }

    /// Drops `path` and every key below it (`path?…`, `path/…`).
    pub fn invalidate(&self, path: &str) {
        let query_prefix = format!("{path}?");
        let child_prefix = format!("{path}/");
        self.entries().retain(|key, _| {
            key != path && !key.starts_with(&query_prefix) && !key.starts_with(&child_prefix)
        });
        log::debug!("Invalidated cached pages under {path}");
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_drops_path_and_children_only() {
        let cache = PageCache::default();
        cache.insert("/books?page=2", &1);
        cache.insert("/books/b1", &2);
        cache.insert("/bookshelf", &3);
        cache.insert("/topics", &4);

        cache.invalidate("/books");

        assert_eq!(cache.get::<i32>("/books?page=2"), None);
        assert_eq!(cache.get::<i32>("/books/b1"), None);
        assert_eq!(cache.get::<i32>("/bookshelf"), Some(3));
        assert_eq!(cache.get::<i32>("/topics"), Some(4));
    }

    /// Entries past their TTL are purged by the next insert even when never
    /// read again.
    #[test]
    fn expired_entries_are_purged_on_insert() {
        let cache = PageCache::new(Duration::from_millis(200));
        for page in 1..=50 {
            cache.insert(&format!("/books?page={page}"), &page);
        }
        assert_eq!(cache.len(), 50);

        std::thread::sleep(Duration::from_millis(300));
        cache.insert("/topics", &1);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<i32>("/topics"), Some(1));
    }

    #[test]
    fn capacity_evicts_oldest_entries_first() {
        let cache = PageCache::default().with_max_entries(3);
        for page in 1..=5 {
            cache.insert(&format!("/books?page={page}"), &page);
            std::thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get::<i32>("/books?page=1"), None);
        assert_eq!(cache.get::<i32>("/books?page=2"), None);
        assert_eq!(cache.get::<i32>("/books?page=5"), Some(5));

        cache.insert("/books?page=5", &50);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get::<i32>("/books?page=3"), Some(3));
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = PageCache::new(Duration::ZERO);
        cache.insert("/books", &1);
        assert!(cache.is_empty());
    }
}

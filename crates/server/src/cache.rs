//! Snap name cache for repository enrichment.
//!
//! Listing repositories looks up every repository's build manifest to find
//! its snap name. Those lookups are memoized here, keyed by repository URL,
//! so a second listing does not hit GitHub again for the same repository.
//!
//! Entries never expire on their own; callers invalidate with [`SnapNameCache::clear`].

use dashmap::DashMap;
use std::fmt::Display;
use std::future::Future;

/// Memoized repository URL -> snap name lookups.
///
/// A stored `None` records that the repository has no manifest (or no name
/// in it) and is a hit like any other value.
#[derive(Debug, Default)]
pub struct SnapNameCache {
    entries: DashMap<String, Option<String>>,
}

impl SnapNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the cache key for a repository URL.
    pub fn cache_key(repository_url: &str) -> String {
        format!("snap_name:{repository_url}")
    }

    /// Cached value for a repository, if present.
    pub fn get(&self, repository_url: &str) -> Option<Option<String>> {
        self.entries
            .get(&Self::cache_key(repository_url))
            .map(|entry| entry.value().clone())
    }

    /// Store a value for a repository.
    pub fn insert(&self, repository_url: &str, snap_name: Option<String>) {
        self.entries
            .insert(Self::cache_key(repository_url), snap_name);
    }

    /// Return the cached snap name, or run `fetch` and remember its result.
    ///
    /// `Ok` results (including `Ok(None)`) are stored. An `Err` is logged and
    /// resolves to `None` without being stored, so the next call retries.
    ///
    /// Concurrent misses for the same key may each call `fetch`; they store
    /// the same value.
    pub async fn get_or_fetch<F, Fut, E>(&self, repository_url: &str, fetch: F) -> Option<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<String>, E>>,
        E: Display,
    {
        if let Some(cached) = self.get(repository_url) {
            crate::metrics::SNAP_NAME_CACHE_HITS.inc();
            return cached;
        }
        crate::metrics::SNAP_NAME_CACHE_MISSES.inc();

        match fetch().await {
            Ok(snap_name) => {
                self.insert(repository_url, snap_name.clone());
                snap_name
            }
            Err(e) => {
                tracing::debug!(
                    repository_url,
                    error = %e,
                    "Snap name lookup failed, leaving uncached"
                );
                None
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

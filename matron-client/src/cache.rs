//! Stale-while-revalidate resource cache.
//!
//! An explicit service instance, not module-level state: everything sharing a
//! `ResourceCache` (and a key) shares the cached value and revalidates
//! together. Keys are request signatures — in practice the request URL.
//!
//! Semantics:
//! - `fetch` returns the cached value when it is fresh, otherwise runs the
//!   registered loader. Identical concurrent fetches for one key are
//!   deduplicated: one loader run, every caller gets its result.
//! - a failed load keeps the previous value and records the error; the entry
//!   stays stale so the next fetch retries.
//! - `mutate` marks the entry stale and re-runs the loader immediately,
//!   resolving once the new data has landed.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

use crate::error::Result;

type LoaderFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;
type Loader = Arc<dyn Fn() -> LoaderFuture + Send + Sync>;

/// Snapshot of one cache entry, the `{data, error, isLoading, isValidating}`
/// tuple list views render from.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    pub data: Option<Value>,
    pub error: Option<String>,
    /// A load is running and there is no previous data to show.
    pub is_loading: bool,
    /// A load is running (first or not).
    pub is_validating: bool,
    /// Incremented every time new data lands.
    pub revision: u64,
}

struct Entry {
    data: Option<Value>,
    error: Option<String>,
    revision: u64,
    stale: bool,
    validating: bool,
    /// Bumped by every invalidation. A load only clears `stale` when no
    /// invalidation happened after it started, so a `mutate` issued while a
    /// fetch is in flight still forces a re-run once that flight lands.
    epoch: u64,
    loader: Option<Loader>,
    /// Single-flight guard: held for the duration of a load.
    guard: Arc<Mutex<()>>,
}

impl Entry {
    fn new() -> Self {
        Self {
            data: None,
            error: None,
            revision: 0,
            stale: true,
            validating: false,
            epoch: 0,
            loader: None,
            guard: Arc::new(Mutex::new(())),
        }
    }

    fn snapshot(&self) -> FetchState {
        FetchState {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.validating && self.data.is_none(),
            is_validating: self.validating,
            revision: self.revision,
        }
    }
}

#[derive(Default)]
pub struct ResourceCache {
    // Never held across an await; the per-entry guard is what outlives polls.
    entries: StdMutex<HashMap<String, Entry>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the value for `key`, registering `loader` as its revalidation
    /// function. Returns the cached value when fresh; loads otherwise.
    pub async fn fetch<F, Fut>(&self, key: &str, loader: F) -> FetchState
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let loader: Loader = Arc::new(move || Box::pin(loader()) as LoaderFuture);

        let (needs_load, guard) = {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries.entry(key.to_string()).or_insert_with(Entry::new);
            entry.loader = Some(loader);
            (entry.stale || entry.data.is_none(), entry.guard.clone())
        };

        if !needs_load {
            return self.snapshot(key);
        }

        self.revalidate(key, guard).await
    }

    /// Mark `key` stale and re-fetch it now. Returns the post-fetch snapshot.
    /// Idempotent with respect to final data: repeated calls without
    /// intervening writes converge on the same value.
    pub async fn mutate(&self, key: &str) -> FetchState {
        let guard = {
            let mut entries = self.entries.lock().unwrap();
            let Some(entry) = entries.get_mut(key) else {
                // Nothing has been fetched under this key yet.
                return FetchState::default();
            };
            entry.stale = true;
            entry.epoch += 1;
            if entry.loader.is_none() {
                return entry.snapshot();
            }
            entry.guard.clone()
        };

        self.revalidate(key, guard).await
    }

    /// Current state without triggering any fetch.
    pub fn snapshot(&self, key: &str) -> FetchState {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(Entry::snapshot)
            .unwrap_or_default()
    }

    async fn revalidate(&self, key: &str, guard: Arc<Mutex<()>>) -> FetchState {
        let _flight = guard.lock().await;

        // Re-check after acquiring the guard: a concurrent flight may have
        // already landed fresh data.
        let (loader, epoch) = {
            let mut entries = self.entries.lock().unwrap();
            let Some(entry) = entries.get_mut(key) else {
                return FetchState::default();
            };
            if !entry.stale && entry.data.is_some() {
                return entry.snapshot();
            }
            let Some(loader) = entry.loader.clone() else {
                return entry.snapshot();
            };
            entry.validating = true;
            (loader, entry.epoch)
        };

        let result = loader().await;

        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries.get_mut(key) else {
            return FetchState::default();
        };
        entry.validating = false;
        match result {
            Ok(value) => {
                entry.data = Some(value);
                entry.error = None;
                // An invalidation that arrived mid-flight keeps the entry
                // stale; its waiter re-runs the loader next.
                entry.stale = entry.epoch != epoch;
                entry.revision += 1;
            }
            Err(e) => {
                // Keep the last good value; the entry stays stale so the
                // next fetch retries.
                tracing::warn!(key, error = %e, "Revalidation failed");
                entry.error = Some(e.user_message());
            }
        }
        entry.snapshot()
    }
}

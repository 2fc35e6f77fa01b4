use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::time::Instant;

use super::{retry, ContentSource, QueryKey, QueryParams, QueryResult};
use crate::config::QueryOptions;
use crate::error::Error;

/// Cached state of one entry, broadcast to every watcher.
#[derive(Debug, Clone, Default)]
struct EntryState {
    data: Option<Arc<Value>>,
    error: Option<Arc<Error>>,
    fetching: bool,
    settled_at: Option<Instant>,
}

impl EntryState {
    /// Decode the cached value as `T`. A shape mismatch becomes a parse
    /// error, reported on the diagnostics target when `log_errors` is set.
    fn to_result<T: DeserializeOwned>(&self, key: &QueryKey, log_errors: bool) -> QueryResult<T> {
        let mut error = self.error.clone();
        let data = self.data.as_ref().and_then(|value| match T::deserialize(value.as_ref()) {
            Ok(data) => Some(data),
            Err(e) => {
                error.get_or_insert_with(|| {
                    let err = Error::parse(format!("Unexpected result shape: {e}"), Some(key.to_string()));
                    if log_errors {
                        tracing::error!(target: "ucc_content::diagnostics", query = %key, "[Sanity] {}", err);
                    }
                    Arc::new(err)
                });
                None
            }
        });

        QueryResult {
            is_loading: self.fetching && self.data.is_none() && self.error.is_none(),
            data,
            error,
        }
    }

    fn is_due(&self, stale_time: std::time::Duration) -> bool {
        self.settled_at.is_none_or(|at| at.elapsed() >= stale_time)
    }
}

#[derive(Debug)]
struct Entry {
    key: QueryKey,
    query: String,
    params: Option<QueryParams>,
    state: watch::Sender<EntryState>,
}

struct Inner {
    source: Arc<dyn ContentSource>,
    options: QueryOptions,
    entries: Mutex<HashMap<QueryKey, Arc<Entry>>>,
}

/// Read-through cache of query results, shared by every section of a page.
///
/// Construct one per application (or per request/tenant when rendering on
/// a server) and pass it to whatever needs content. Cloning is cheap and
/// clones share the cache. Fetches run on the Tokio runtime, so queries
/// must be issued from within one.
#[derive(Clone)]
pub struct ContentStore {
    inner: Arc<Inner>,
}

impl ContentStore {
    /// Create a store over `source` with the given cache and retry policy.
    pub fn new(source: impl ContentSource + 'static, options: QueryOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                source: Arc::new(source),
                options,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Policy this store was built with.
    pub fn options(&self) -> &QueryOptions {
        &self.inner.options
    }

    /// Current snapshot of a query, without waiting.
    ///
    /// A missing entry starts a fetch and reports `is_loading`. A stale entry
    /// returns its cached data and refreshes in the background.
    pub fn query<T: DeserializeOwned>(
        &self,
        key: &str,
        query: &str,
        params: Option<&QueryParams>,
    ) -> QueryResult<T> {
        let entry = self.entry(key, query, params);
        self.refresh_if_due(&entry);
        let state = entry.state.borrow().clone();
        state.to_result(&entry.key, self.inner.options.log_errors)
    }

    /// Like [`query`](Self::query), but waits for any in-flight fetch to settle.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        key: &str,
        query: &str,
        params: Option<&QueryParams>,
    ) -> QueryResult<T> {
        let entry = self.entry(key, query, params);
        self.refresh_if_due(&entry);

        let mut rx = entry.state.subscribe();
        let state = match rx.wait_for(|s| !s.fetching).await {
            Ok(state) => state.clone(),
            Err(_) => entry.state.borrow().clone(),
        };
        state.to_result(&entry.key, self.inner.options.log_errors)
    }

    /// Watch a query for changes, starting a fetch if one is due.
    pub fn subscribe(&self, key: &str, query: &str, params: Option<&QueryParams>) -> QueryWatch {
        let entry = self.entry(key, query, params);
        self.refresh_if_due(&entry);
        QueryWatch {
            key: entry.key.clone(),
            rx: entry.state.subscribe(),
            log_errors: self.inner.options.log_errors,
        }
    }

    /// The host regained focus: refresh every cached query not already in flight.
    ///
    /// Returns how many refreshes were started.
    pub fn on_focus(&self) -> usize {
        if !self.inner.options.refetch_on_focus {
            return 0;
        }

        let entries: Vec<Arc<Entry>> = self.lock_entries().values().cloned().collect();
        let started = entries.iter().filter(|entry| self.start_fetch(entry, true)).count();
        tracing::debug!("Focus regained, refreshing {} queries", started);
        started
    }

    /// Forget every entry cached under `key`, whatever its parameters.
    ///
    /// In-flight fetches for removed entries still complete but populate nothing visible.
    pub fn invalidate(&self, key: &str) -> usize {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|k, _| k.key() != key);
        before - entries.len()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether nothing has been queried yet.
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Arc<Entry>>> {
        self.inner.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, key: &str, query: &str, params: Option<&QueryParams>) -> Arc<Entry> {
        let cache_key = QueryKey::new(key, params);
        let mut entries = self.lock_entries();
        Arc::clone(entries.entry(cache_key.clone()).or_insert_with(|| {
            tracing::debug!(query = %cache_key, "New cache entry");
            let (state, _) = watch::channel(EntryState::default());
            Arc::new(Entry {
                key: cache_key,
                query: query.to_string(),
                params: params.cloned(),
                state,
            })
        }))
    }

    fn refresh_if_due(&self, entry: &Arc<Entry>) {
        self.start_fetch(entry, false);
    }

    /// Mark `entry` as fetching and spawn the fetch, unless one is already
    /// running or (without `force`) the cached value is still fresh.
    fn start_fetch(&self, entry: &Arc<Entry>, force: bool) -> bool {
        let stale_time = self.inner.options.stale_time;
        let started = entry.state.send_if_modified(|state| {
            if state.fetching || !(force || state.is_due(stale_time)) {
                return false;
            }
            state.fetching = true;
            true
        });

        if started {
            self.spawn_fetch(Arc::clone(entry));
        }
        started
    }

    fn spawn_fetch(&self, entry: Arc<Entry>) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let label = entry.key.to_string();
            let source = &inner.source;
            let query = entry.query.as_str();
            let params = entry.params.as_ref();

            let result = retry::with_retry(inner.options.max_retries, &label, || {
                source.fetch(query, params)
            })
            .await;

            match &result {
                Ok(_) => tracing::debug!(query = %label, "Fetch settled"),
                Err(e) if inner.options.log_errors => {
                    tracing::error!(target: "ucc_content::diagnostics", query = %label, "[Sanity] Fetch failed: {}", e);
                }
                Err(_) => {}
            }

            entry.state.send_modify(|state| {
                state.fetching = false;
                state.settled_at = Some(Instant::now());
                match result {
                    Ok(value) => {
                        state.data = Some(Arc::new(value));
                        state.error = None;
                    }
                    // Earlier data stays cached; the error takes display priority.
                    Err(e) => state.error = Some(Arc::new(e)),
                }
            });
        });
    }
}

/// A live view of one query, for consumers that re-render on change.
#[derive(Debug)]
pub struct QueryWatch {
    key: QueryKey,
    rx: watch::Receiver<EntryState>,
    log_errors: bool,
}

impl QueryWatch {
    /// Cache identity being watched.
    pub const fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Wait for the next state transition. `false` once the entry is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Latest snapshot, marking it as seen.
    pub fn result<T: DeserializeOwned>(&mut self) -> QueryResult<T> {
        self.rx.borrow_and_update().to_result(&self.key, self.log_errors)
    }
}

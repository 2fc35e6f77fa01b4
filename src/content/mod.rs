//! Content retrieval adapter.
//!
//! Presentation code asks a [`ContentStore`] for a query by cache key and
//! receives a [`QueryResult`] snapshot: `data`, `is_loading` and `error`.
//! The store serves cached results, refreshes them in the background once
//! stale or when the host regains focus, and retries failed fetches with
//! exponential back-off before surfacing the error.

/// Compound cache identity
pub mod key;
/// Retry delays and the retry loop
pub mod retry;
/// Where query results come from
pub mod source;
/// The shared read-through cache
pub mod store;

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Error;

pub use key::QueryKey;
pub use source::ContentSource;
pub use store::{ContentStore, QueryWatch};

/// GROQ parameters (`$name` bindings). Ordered so identical sets compare equal.
pub type QueryParams = BTreeMap<String, Value>;

/// Snapshot of one query as seen by a consumer.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    /// Last successfully fetched value, if any.
    pub data: Option<T>,
    /// A fetch is in flight and there is no data yet.
    pub is_loading: bool,
    /// Error from the most recent settled fetch.
    pub error: Option<Arc<Error>>,
}

impl<T> QueryResult<T> {
    /// A query that has not produced anything yet.
    pub const fn loading() -> Self {
        Self { data: None, is_loading: true, error: None }
    }

    /// A settled, successful query.
    pub const fn success(data: T) -> Self {
        Self { data: Some(data), is_loading: false, error: None }
    }

    /// A settled, failed query.
    pub fn failure(error: Error) -> Self {
        Self { data: None, is_loading: false, error: Some(Arc::new(error)) }
    }

    /// Transform the data while keeping the loading and error state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryResult<U> {
        QueryResult {
            data: self.data.map(f),
            is_loading: self.is_loading,
            error: self.error,
        }
    }

    /// Borrowing view of this result.
    pub fn as_ref(&self) -> QueryResult<&T> {
        QueryResult {
            data: self.data.as_ref(),
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self::loading()
    }
}

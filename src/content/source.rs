use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::QueryParams;
use crate::error::Result;

/// Trait for content providers.
///
/// The production implementation is
/// [`SanityClient`](crate::sanity::SanityClient); tests substitute scripted
/// sources.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run a query and return its JSON result. Either the whole result or an error.
    async fn fetch(&self, query: &str, params: Option<&QueryParams>) -> Result<Value>;
}

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Arc<S> {
    async fn fetch(&self, query: &str, params: Option<&QueryParams>) -> Result<Value> {
        (**self).fetch(query, params).await
    }
}

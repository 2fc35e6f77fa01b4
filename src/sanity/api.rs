use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration as StdDuration;

use crate::config::Config;
use crate::constants;
use crate::content::{ContentSource, QueryParams};
use crate::error::{Error, Result};

/// Read-only client for the Sanity query API
///
/// Issues GROQ queries over HTTPS and unwraps the `result` field of the
/// response. Parameters are sent as `$name` query-string pairs with
/// JSON-encoded values.
#[derive(Clone)]
pub struct SanityClient {
    project_id: String,
    dataset: String,
    api_version: String,
    token: Option<String>,
    base_url: String,
    client: Client,
}

impl SanityClient {
    /// Create a new Sanity client from config
    pub fn new(config: &Config) -> Self {
        let host = if config.sanity_use_cdn { "apicdn" } else { "api" };
        Self {
            project_id: config.sanity_project_id.clone(),
            dataset: config.sanity_dataset.clone(),
            api_version: config.sanity_api_version.clone(),
            token: config.sanity_token.clone(),
            base_url: format!("https://{}.{}.sanity.io", config.sanity_project_id, host),
            client: Client::builder()
                .timeout(StdDuration::from_secs(constants::sanity::REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Point the client at a different host (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Check if a project is configured
    fn is_configured(&self) -> bool {
        !self.project_id.is_empty()
    }

    /// Query endpoint for the configured dataset
    fn query_url(&self) -> String {
        format!("{}/v{}/data/query/{}", self.base_url, self.api_version, self.dataset)
    }

    /// Run a GROQ query and return the raw `result` value
    pub async fn query_value(&self, query: &str, params: Option<&QueryParams>) -> Result<Value> {
        if !self.is_configured() {
            return Err(Error::config(
                "Sanity client not configured",
                "Set the SANITY_PROJECT_ID environment variable",
            ));
        }

        let mut pairs: Vec<(String, String)> = vec![("query".to_string(), query.trim().to_string())];
        if let Some(params) = params {
            for (name, value) in params {
                let encoded = serde_json::to_string(value)
                    .map_err(|e| Error::parse(format!("Unencodable parameter ${name}: {e}"), None))?;
                pairs.push((format!("${name}"), encoded));
            }
        }

        let mut request = self.client.get(self.query_url()).query(&pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("Query request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let detail = error_description(&body).unwrap_or_else(|| status.to_string());
            return Err(Error::sanity_status(
                format!("Query returned {status}: {detail}"),
                status.as_u16(),
            ));
        }

        let mut json: Value = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from query endpoint: {e}"), None))?;

        match json.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(Error::parse("Missing 'result' in query response", None)),
        }
    }

    /// Run a GROQ query and deserialize its result
    pub async fn query<T: DeserializeOwned>(&self, query: &str, params: Option<&QueryParams>) -> Result<T> {
        let value = self.query_value(query, params).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::parse(format!("Unexpected result shape: {e}"), None))
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn fetch(&self, query: &str, params: Option<&QueryParams>) -> Result<Value> {
        self.query_value(query, params).await
    }
}

/// Pull a human-readable message out of an API error body.
fn error_description(body: &Value) -> Option<String> {
    body["error"]["description"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .or_else(|| body["error"].as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn builds_cdn_and_live_urls() {
        let mut config = Config::default();
        config.sanity_project_id = "hwaszqf8".into();

        let cdn = SanityClient::new(&config);
        assert_eq!(
            cdn.query_url(),
            "https://hwaszqf8.apicdn.sanity.io/v2026-02-17/data/query/production"
        );

        config.sanity_use_cdn = false;
        config.sanity_dataset = "staging".into();
        let live = SanityClient::new(&config);
        assert_eq!(
            live.query_url(),
            "https://hwaszqf8.api.sanity.io/v2026-02-17/data/query/staging"
        );
    }

    #[test]
    fn extracts_error_descriptions() {
        let groq = json!({"error": {"description": "expected '}'", "type": "queryParseError"}});
        assert_eq!(error_description(&groq).as_deref(), Some("expected '}'"));
        let http = json!({"statusCode": 404, "error": "Not Found", "message": "Dataset not found"});
        assert_eq!(error_description(&http).as_deref(), Some("Dataset not found"));
        assert!(error_description(&Value::Null).is_none());
    }

    #[tokio::test]
    async fn unconfigured_client_fails_without_request() {
        let client = SanityClient::new(&Config::default());
        let err = client.query_value("*[]", None).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}

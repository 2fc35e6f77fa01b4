//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::time::Duration;

use crate::constants;
use crate::error::Result;

/// Runtime mode controlling diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Local development: fetch errors are logged to the diagnostics target.
    Development,
    /// Deployed build: diagnostic logging is suppressed.
    Production,
}

impl Mode {
    /// Mode implied by the build profile.
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Parse a `UCC_ENV` value, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Whether this is development mode.
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// `Sanity` project identifier
    pub sanity_project_id: String,
    /// `Sanity` dataset name
    pub sanity_dataset: String,
    /// Pinned API version date
    pub sanity_api_version: String,
    /// Read from the API CDN instead of the live API
    pub sanity_use_cdn: bool,
    /// Optional read token for private datasets
    pub sanity_token: Option<String>,
    /// Public base URL of the website
    pub site_url: Option<String>,
    /// Explicit location of the runtime giving configuration
    pub giving_config_url: Option<String>,
    /// Development or production behaviour
    pub mode: Mode,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            sanity_project_id: String::new(),
            sanity_dataset: constants::sanity::DEFAULT_DATASET.to_string(),
            sanity_api_version: constants::sanity::DEFAULT_API_VERSION.to_string(),
            sanity_use_cdn: true,
            sanity_token: None,
            site_url: None,
            giving_config_url: None,
            mode: Mode::from_build(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// A missing project ID is logged as a configuration error; content
    /// fetches then fail individually instead of aborting startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(project_id) = var("SANITY_PROJECT_ID") {
            config.sanity_project_id = project_id.trim().to_string();
        } else {
            tracing::error!("Sanity project ID is not set. Check your environment variables.");
        }

        if let Some(dataset) = var("SANITY_DATASET") {
            config.sanity_dataset = dataset;
        }

        if let Some(version) = var("SANITY_API_VERSION") {
            config.sanity_api_version = version.trim_start_matches('v').to_string();
        }

        if let Some(use_cdn) = var("SANITY_USE_CDN") {
            config.sanity_use_cdn = !matches!(use_cdn.to_ascii_lowercase().as_str(), "0" | "false" | "no");
        }

        config.sanity_token = var("SANITY_TOKEN");
        config.site_url = var("SITE_URL").map(|url| url.trim_end_matches('/').to_string());
        config.giving_config_url = var("GIVING_CONFIG_URL");

        if let Some(mode) = var("UCC_ENV") {
            match Mode::parse(&mode) {
                Some(mode) => config.mode = mode,
                None => tracing::warn!("Ignoring unknown UCC_ENV value {:?}", mode),
            }
        }

        config
    }

    /// Check if the `Sanity` project is configured
    pub fn has_project_id(&self) -> bool {
        !self.sanity_project_id.is_empty()
    }

    /// Location of `giving-config.json`, if one can be derived.
    pub fn giving_config_location(&self) -> Option<String> {
        self.giving_config_url.clone().or_else(|| {
            self.site_url
                .as_ref()
                .map(|site| format!("{site}{}", constants::giving::CONFIG_PATH))
        })
    }
}

/// Cache and retry policy for content queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Age after which cached data triggers a background refresh
    pub stale_time: Duration,
    /// Refresh every cached query when the host regains focus
    pub refetch_on_focus: bool,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Log every fetch error to the diagnostics target
    pub log_errors: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(constants::cache::STALE_TIME_SECS),
            refetch_on_focus: constants::cache::REFETCH_ON_FOCUS,
            max_retries: constants::retry::MAX_RETRIES,
            log_errors: Mode::from_build().is_development(),
        }
    }
}

impl QueryOptions {
    /// Default policy with diagnostics following the configured mode.
    pub fn for_config(config: &Config) -> Self {
        Self {
            log_errors: config.mode.is_development(),
            ..Self::default()
        }
    }
}

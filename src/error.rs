//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// `Sanity` content API error with status context
    #[error("Sanity API error: {message}")]
    Sanity {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response or document parsing error
    #[error("Parse error in {source_name:?}: {message}")]
    Parse {
        /// Query key, URL or file that failed to parse, if known.
        source_name: Option<String>,
        /// Description of the parse failure.
        message: String,
    },

    /// Giving form or giving configuration error
    #[error("Giving error: {0}")]
    Giving(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create a `Sanity` error with HTTP status
    pub fn sanity_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("The GROQ query or its parameters are malformed"),
            401 => Some("Check the SANITY_TOKEN environment variable"),
            403 => Some("The dataset may be private - set SANITY_TOKEN or make it public"),
            404 => Some("Check SANITY_PROJECT_ID and SANITY_DATASET"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Sanity server error - try again later"),
            _ => None,
        };
        Self::Sanity {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with source context
    pub fn parse(message: impl Into<String>, source_name: impl Into<Option<String>>) -> Self {
        Self::Parse { source_name: source_name.into(), message: message.into() }
    }

    /// Whether a retry has a reasonable chance of succeeding.
    ///
    /// Network failures, rate limiting and server errors are transient;
    /// configuration, parse and client errors are not.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Sanity { status: Some(status), .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn sanity_status_provides_hints() {
        let err = Error::sanity_status("Not Found", 404);
        match err {
            Error::Sanity { hint: Some(h), .. } => {
                assert!(h.contains("SANITY_PROJECT_ID"));
            }
            _ => panic!("Expected Sanity error with hint"),
        }
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(Error::sanity_status("boom", 503).is_transient());
        assert!(Error::sanity_status("slow down", 429).is_transient());
        assert!(Error::Network("reset".into()).is_transient());
        assert!(!Error::sanity_status("bad query", 400).is_transient());
        assert!(!Error::config("missing", "set it").is_transient());
    }
}

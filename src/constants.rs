//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Content cache constants.
pub mod cache {
    /// How long a successful result is served without a background refresh.
    pub const STALE_TIME_SECS: u64 = 5 * 60;

    /// Whether regaining foreground focus refreshes cached queries.
    pub const REFETCH_ON_FOCUS: bool = true;
}

/// Retry policy constants.
pub mod retry {
    /// Additional attempts after the first failure.
    pub const MAX_RETRIES: u32 = 2;

    /// Delay before the first retry, doubled on every attempt.
    pub const BASE_DELAY_MS: u64 = 1_000;

    /// Upper bound on any single retry delay.
    pub const MAX_DELAY_MS: u64 = 30_000;
}

/// Sanity API constants.
pub mod sanity {
    /// Dataset used when `SANITY_DATASET` is unset.
    pub const DEFAULT_DATASET: &str = "production";

    /// API version date pinned for query stability.
    pub const DEFAULT_API_VERSION: &str = "2026-02-17";

    /// Per-request HTTP timeout.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Image CDN host.
    pub const IMAGE_CDN: &str = "https://cdn.sanity.io/images";
}

/// Section display constants.
pub mod display {
    /// Skeleton cards shown while the home page announcements load.
    pub const ANNOUNCEMENT_SKELETONS: usize = 3;

    /// Skeleton cards shown while the sermons grid loads.
    pub const SERMON_SKELETONS: usize = 6;

    /// Skeleton cards shown while the events feed loads.
    pub const EVENT_SKELETONS: usize = 4;

    /// Skeleton cards shown while leadership groups load.
    pub const LEADERSHIP_SKELETONS: usize = 3;

    /// Generic notice rendered when content cannot be shown.
    pub const DEFAULT_FALLBACK_MESSAGE: &str =
        "Content temporarily unavailable. Please try again shortly.";
}

/// Giving page constants.
pub mod giving {
    /// Path of the runtime giving configuration document.
    pub const CONFIG_PATH: &str = "/giving-config.json";

    /// Smallest amount accepted for a single fund.
    pub const MIN_FUND_AMOUNT: f64 = 1.0;
}

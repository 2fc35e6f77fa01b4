//! Sanity CMS integration.
//!
//! Provides the read-only GROQ client, the projected document types the
//! site consumes, the query expressions that produce them and image URL
//! helpers.

/// HTTP client for the Sanity query API
pub mod api;
/// Image asset URL building and fallback images
pub mod image;
/// GROQ query expressions
pub mod queries;
/// Projected document types
pub mod types;

// Re-export key components
pub use api::SanityClient;
pub use types::{Announcement, Event, Leader, LeadershipGroup, Sermon, ServiceTime, SiteSettings};

//! `ucc-content` - content layer for the United Community Church website.
//!
//! This crate reads sermons, events, announcements, leadership and site
//! settings from the Sanity CMS, caches them with stale-while-revalidate
//! semantics, and resolves each page section into a display state
//! (error, loading, empty or content) that renders the same way everywhere.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod content;
pub mod dates;
pub mod display;
pub mod error;
pub mod feed;
pub mod giving;
pub mod logging;
pub mod navigation;
pub mod portable_text;
pub mod render;
pub mod sanity;
pub mod schema;
pub mod types;

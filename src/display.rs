//! Display-state resolution for content-driven page sections.
//!
//! Every section resolves its [`QueryResult`] the same way, in a fixed
//! priority order: an error wins over everything (stale data is never shown
//! next to an error), then loading, then empty, then the data itself. An
//! empty result renders the same fallback as an error so a page never shows
//! a section header with nothing under it.

use crate::constants::display::DEFAULT_FALLBACK_MESSAGE;
use crate::content::QueryResult;
use crate::sanity::SiteSettings;

/// What to show instead of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// An informational banner with this message.
    Notice(String),
    /// Render nothing; the section disappears.
    Hidden,
}

impl Default for Fallback {
    fn default() -> Self {
        Self::Notice(DEFAULT_FALLBACK_MESSAGE.to_string())
    }
}

impl Fallback {
    /// Banner with a caller-supplied message.
    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice(message.into())
    }
}

/// Per-section resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOptions {
    /// Placeholder cards while loading.
    pub skeletons: usize,
    /// Shown on error or when there is nothing to display.
    pub fallback: Fallback,
}

impl SectionOptions {
    /// Default banner fallback with `skeletons` placeholders.
    pub fn new(skeletons: usize) -> Self {
        Self { skeletons, fallback: Fallback::default() }
    }

    /// Replace the fallback.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}

/// Whether loaded data counts as "nothing to show".
pub trait Presentable {
    /// True when the section would render no entries.
    fn is_blank(&self) -> bool;
}

impl<T> Presentable for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Presentable> Presentable for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_none_or(Presentable::is_blank)
    }
}

impl Presentable for SiteSettings {
    fn is_blank(&self) -> bool {
        self.church_name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.service_times.is_empty()
    }
}

/// The resolved state of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState<'a, T> {
    /// Error or empty result.
    Fallback(Fallback),
    /// Fetch in flight with no data: render this many skeleton cards.
    Loading {
        /// Number of placeholders.
        skeletons: usize,
    },
    /// Content to render.
    Success(&'a T),
}

impl<'a, T: Presentable> DisplayState<'a, T> {
    /// Resolve a query snapshot: Error, then Loading, then Empty, then Success.
    pub fn resolve(result: &'a QueryResult<T>, options: &SectionOptions) -> Self {
        if result.error.is_some() {
            return Self::Fallback(options.fallback.clone());
        }

        match &result.data {
            None if result.is_loading => Self::Loading { skeletons: options.skeletons },
            None => Self::Fallback(options.fallback.clone()),
            Some(data) if data.is_blank() => Self::Fallback(options.fallback.clone()),
            Some(data) => Self::Success(data),
        }
    }

    /// The content, if resolved to success.
    pub const fn data(&self) -> Option<&'a T> {
        match self {
            Self::Success(data) => Some(*data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::Error;
    use std::sync::Arc;

    type Items = Vec<&'static str>;

    fn resolve<'a>(result: &'a QueryResult<Items>, options: &SectionOptions) -> DisplayState<'a, Items> {
        DisplayState::resolve(result, options)
    }

    #[test]
    fn error_wins_over_data_and_loading() {
        let options = SectionOptions::new(3).with_fallback(Fallback::notice("Events are unavailable"));
        for (data, is_loading) in [(Some(vec!["stale"]), false), (None, true), (Some(vec![]), true)] {
            let result = QueryResult {
                data,
                is_loading,
                error: Some(Arc::new(Error::Network("reset".into()))),
            };
            assert_eq!(
                resolve(&result, &options),
                DisplayState::Fallback(Fallback::notice("Events are unavailable"))
            );
        }
    }

    #[test]
    fn loading_renders_requested_skeletons() {
        let result = QueryResult::<Items>::loading();
        assert_eq!(resolve(&result, &SectionOptions::new(6)), DisplayState::Loading { skeletons: 6 });
        assert_eq!(resolve(&result, &SectionOptions::new(3)), DisplayState::Loading { skeletons: 3 });
    }

    #[test]
    fn empty_uses_the_error_fallback() {
        let options = SectionOptions::new(3);
        let empty = QueryResult::success(Items::new());
        assert_eq!(resolve(&empty, &options), DisplayState::Fallback(Fallback::default()));

        let hidden = SectionOptions::new(3).with_fallback(Fallback::Hidden);
        assert_eq!(resolve(&empty, &hidden), DisplayState::Fallback(Fallback::Hidden));
    }

    #[test]
    fn settled_without_data_is_empty_not_loading() {
        let result = QueryResult::<Items> { data: None, is_loading: false, error: None };
        assert_eq!(resolve(&result, &SectionOptions::new(3)), DisplayState::Fallback(Fallback::default()));
    }

    #[test]
    fn success_borrows_the_data() {
        let result = QueryResult::success(vec!["a", "b"]);
        let state = resolve(&result, &SectionOptions::new(3));
        assert_eq!(state.data().map(Vec::len), Some(2));
    }

    #[test]
    fn missing_singleton_is_empty() {
        let result: QueryResult<Option<SiteSettings>> = QueryResult::success(None);
        let state: DisplayState<'_, Option<SiteSettings>> =
            DisplayState::resolve(&result, &SectionOptions::new(1));
        assert_eq!(state, DisplayState::Fallback(Fallback::default()));

        let present = QueryResult::success(Some(SiteSettings {
            church_name: Some("United Community Church".into()),
            ..SiteSettings::default()
        }));
        let state: DisplayState<'_, Option<SiteSettings>> =
            DisplayState::resolve(&present, &SectionOptions::new(1));
        assert!(state.data().is_some());
    }

    #[test]
    fn default_fallback_message() {
        assert_eq!(
            Fallback::default(),
            Fallback::Notice("Content temporarily unavailable. Please try again shortly.".into())
        );
    }
}

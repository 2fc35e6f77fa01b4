//! Image asset URLs.
//!
//! Most queries already dereference `asset->url`; this builder covers raw
//! asset references (`image-<id>-<w>x<h>-<format>`) and sized variants.

use crate::config::Config;
use crate::constants;

/// Served from the site's `public/` directory when a sermon has no thumbnail.
pub const DEFAULT_SERMON_THUMBNAIL: &str = "/images/default-sermon.jpg";

/// Served from the site's `public/` directory when an event has no image.
pub const DEFAULT_EVENT_IMAGE: &str = "/images/default-event.jpg";

/// A parsed image asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Asset hash
    pub id: String,
    /// Original width in pixels
    pub width: u32,
    /// Original height in pixels
    pub height: u32,
    /// File extension
    pub format: String,
}

impl AssetRef {
    /// Parse `image-<id>-<w>x<h>-<format>`.
    pub fn parse(reference: &str) -> Option<Self> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, format) = rest.rsplit_once('-')?;
        let (id, dims) = rest.rsplit_once('-')?;
        let (width, height) = dims.split_once('x')?;

        if id.is_empty() || format.is_empty() {
            return None;
        }

        Some(Self {
            id: id.to_string(),
            width: width.parse().ok()?,
            height: height.parse().ok()?,
            format: format.to_string(),
        })
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Builds CDN URLs for one project and dataset.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    /// Builder for the configured project.
    pub fn new(config: &Config) -> Self {
        Self {
            project_id: config.sanity_project_id.clone(),
            dataset: config.sanity_dataset.clone(),
        }
    }

    /// Start a URL for an asset reference.
    pub fn image<'a>(&'a self, reference: &'a str) -> ImageUrl<'a> {
        ImageUrl {
            builder: self,
            reference,
            width: None,
            height: None,
        }
    }
}

/// A single image URL under construction.
#[derive(Debug, Clone, Copy)]
pub struct ImageUrl<'a> {
    builder: &'a ImageUrlBuilder,
    reference: &'a str,
    width: Option<u32>,
    height: Option<u32>,
}

impl ImageUrl<'_> {
    /// Request a resized width.
    #[must_use]
    pub const fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Request a resized height.
    #[must_use]
    pub const fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Final URL, or `None` when the reference cannot be resolved.
    ///
    /// Absolute URLs pass through untouched.
    pub fn url(&self) -> Option<String> {
        if self.reference.starts_with("http://") || self.reference.starts_with("https://") {
            return Some(self.reference.to_string());
        }
        if self.builder.project_id.is_empty() {
            return None;
        }

        let asset = AssetRef::parse(self.reference)?;
        let mut url = format!(
            "{}/{}/{}/{}-{}x{}.{}",
            constants::sanity::IMAGE_CDN,
            self.builder.project_id,
            self.builder.dataset,
            asset.id,
            asset.width,
            asset.height,
            asset.format,
        );

        let params: Vec<String> = [("w", self.width), ("h", self.height)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
            .collect();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        Some(url)
    }
}

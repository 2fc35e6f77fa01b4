//! Sanity document types.
//!
//! These are the shapes produced by the projections in
//! [`queries`](super::queries), not raw documents: image references arrive
//! already flattened to URL strings. Fields GROQ leaves undefined come back
//! as `null`, so optional data is `Option` and defaulted data treats `null`
//! as absent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates;
use crate::portable_text::{self, Block};
use crate::types::DocumentId;

/// Priority given to announcements that do not set one.
pub const DEFAULT_PRIORITY: u8 = 3;

/// Treat an explicit `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

/// Priority is only a warning-level rule in the studio, so clamp into 1-5.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn null_priority<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|p| p.is_finite())
        .map_or(DEFAULT_PRIORITY, |p| p.round().clamp(1.0, 5.0) as u8))
}

/// A delivered sermon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sermon {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Sermon title
    pub title: String,
    /// Delivery date (`YYYY-MM-DD`)
    pub date: String,
    /// Who preached
    pub speaker: String,
    /// Passage reference, e.g. "John 3:16"
    #[serde(default)]
    pub scripture: Option<String>,
    /// Recording link (http/https)
    #[serde(default)]
    pub video_url: Option<String>,
    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Thumbnail alt text
    #[serde(default)]
    pub thumbnail_alt: Option<String>,
}

impl Sermon {
    /// Delivery date as a calendar day.
    pub fn delivered_on(&self) -> Option<NaiveDate> {
        dates::parse_local_date(&self.date)
    }
}

/// A scheduled church event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Event name
    pub title: String,
    /// Event date (`YYYY-MM-DD`)
    pub date: String,
    /// Free-form time, e.g. "10:00 AM - 12:00 PM"
    #[serde(default)]
    pub time: Option<String>,
    /// Where it happens
    #[serde(default)]
    pub location: Option<String>,
    /// Plain-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Image alt text
    #[serde(default)]
    pub image_alt: Option<String>,
    /// Repeats on a regular schedule
    #[serde(default, deserialize_with = "null_default")]
    pub is_recurring: bool,
}

impl Event {
    /// Event date as a calendar day.
    pub fn held_on(&self) -> Option<NaiveDate> {
        dates::parse_local_date(&self.date)
    }

    /// Whether the event falls on or after `today`. Undated events are not upcoming.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.held_on().is_some_and(|date| date >= today)
    }
}

/// A home page announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Headline
    pub title: String,
    /// Rich-text body
    #[serde(default, deserialize_with = "null_default")]
    pub body: Vec<Block>,
    /// When the announcement starts appearing (RFC 3339)
    pub publish_date: String,
    /// When the announcement stops appearing (RFC 3339)
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Display priority, 1 (lowest) to 5 (highest)
    #[serde(default = "default_priority", deserialize_with = "null_priority")]
    pub priority: u8,
}

impl Announcement {
    /// Publish instant, if parseable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        dates::parse_datetime(&self.publish_date)
    }

    /// Expiry instant, if set and parseable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.as_deref().and_then(dates::parse_datetime)
    }

    /// Visible at `now`: no expiry, or an expiry not yet passed.
    ///
    /// An unparseable expiry is ignored rather than hiding the announcement.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_none_or(|expiry| now <= expiry)
    }

    /// Plain-text preview of the body.
    pub fn excerpt(&self) -> String {
        portable_text::extract_excerpt(&self.body)
    }
}

/// One regular worship service slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTime {
    /// Day of the week, e.g. "Sunday"
    pub day: String,
    /// Time of day, e.g. "10:00 AM"
    pub time: String,
}

/// Global church information (singleton document).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    /// Official church name
    #[serde(default)]
    pub church_name: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Regular service schedule
    #[serde(default, deserialize_with = "null_default")]
    pub service_times: Vec<ServiceTime>,
}

/// A leader embedded in a [`LeadershipGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    /// Full name
    pub name: String,
    /// Role, e.g. "Senior Pastor"
    pub role: String,
    /// Profile image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Profile image alt text
    #[serde(default)]
    pub image_alt: Option<String>,
    /// Short biography
    #[serde(default)]
    pub bio: Option<String>,
}

/// A group of leaders (e.g. "Pastors & Elders", "Deacons").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipGroup {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Group title
    pub title: String,
    /// What the group is responsible for
    #[serde(default)]
    pub description: Option<String>,
    /// Display rank, ascending
    #[serde(default, deserialize_with = "null_default")]
    pub order: i64,
    /// Members in editorial order
    #[serde(default, deserialize_with = "null_default")]
    pub members: Vec<Leader>,
}

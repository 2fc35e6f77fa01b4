//! GROQ query expressions.
//!
//! Every query filters on `_type` (or the fixed `_id` for the singleton)
//! and projects only what the site renders. Image fields are dereferenced
//! with `asset->url` so consumers receive plain URL strings.

use chrono::NaiveDate;
use serde_json::Value;

use crate::content::QueryParams;

/// Fixed document ID of the site settings singleton.
pub const SINGLETON_ID: &str = "siteSettings";

/// All sermons, newest first.
pub const SERMONS_QUERY: &str = r#"
  *[_type == "sermon"] | order(date desc) {
    _id,
    title,
    date,
    speaker,
    scripture,
    videoUrl,
    "thumbnailUrl": thumbnail.asset->url,
    "thumbnailAlt": thumbnail.alt
  }
"#;

/// Events on or after `$today`, soonest first.
///
/// Takes the calendar day as a parameter: comparing a `YYYY-MM-DD` field
/// against `now()` would drop events happening later today.
pub const EVENTS_QUERY: &str = r#"
  *[_type == "event" && date >= $today] | order(date asc) {
    _id,
    title,
    date,
    time,
    location,
    description,
    "imageUrl": image.asset->url,
    "imageAlt": image.alt,
    isRecurring
  }
"#;

/// Announcements with no expiry or a future expiry, highest priority then newest first.
pub const ANNOUNCEMENTS_QUERY: &str = r#"
  *[_type == "announcement" && (!defined(expiryDate) || expiryDate >= now())]
    | order(priority desc, publishDate desc) {
    _id,
    title,
    body,
    publishDate,
    expiryDate,
    priority
  }
"#;

/// The site settings singleton, addressed by ID. Yields one object or `null`.
pub const SITE_SETTINGS_QUERY: &str = r#"
  *[_id == "siteSettings"][0] {
    churchName,
    address,
    phone,
    email,
    serviceTimes[] {
      day,
      time
    }
  }
"#;

/// Leadership groups in display order, members embedded.
pub const LEADERSHIP_GROUPS_QUERY: &str = r#"
  *[_type == "leadershipGroup"] | order(order asc) {
    _id,
    title,
    description,
    order,
    members[] {
      name,
      role,
      "imageUrl": image.asset->url,
      "imageAlt": image.alt,
      bio
    }
  }
"#;

/// Parameters for [`EVENTS_QUERY`].
pub fn events_params(today: NaiveDate) -> QueryParams {
    QueryParams::from([(
        "today".to_string(),
        Value::String(today.format("%Y-%m-%d").to_string()),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_is_queried_by_id() {
        assert!(SITE_SETTINGS_QUERY.contains(&format!("_id == \"{SINGLETON_ID}\"")));
        assert!(!SITE_SETTINGS_QUERY.contains("_type"));
    }

    #[test]
    fn events_params_use_calendar_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9);
        let params = today.map(events_params).unwrap_or_default();
        assert_eq!(params.get("today"), Some(&Value::String("2024-03-09".into())));
        assert!(EVENTS_QUERY.contains("$today"));
    }
}

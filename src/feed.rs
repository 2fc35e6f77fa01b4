//! Derived views over fetched content.
//!
//! The queries already filter and order on the CMS side; these functions
//! apply the same rules locally so cached results stay correct as time
//! passes (an announcement can expire while its query is still fresh).

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::cmp::Reverse;
use std::sync::LazyLock;

use crate::sanity::{Announcement, Event, LeadershipGroup, Sermon};
use crate::types::DocumentId;

/// Regex matching `youtube.com/watch?v=ID` and `youtu.be/ID` links.
#[allow(clippy::expect_used)]
static RE_YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([\w-]+)").expect("valid regex: RE_YOUTUBE")
});

/// Announcements visible at `now`, highest priority first, then newest first.
pub fn active_announcements(items: &[Announcement], now: DateTime<Utc>) -> Vec<Announcement> {
    let mut active: Vec<Announcement> = items.iter().filter(|a| a.is_active(now)).cloned().collect();
    active.sort_by_key(|a| (Reverse(a.priority), Reverse(a.published_at())));
    active
}

/// Events on or after `today`, soonest first.
pub fn upcoming_events(items: &[Event], today: NaiveDate) -> Vec<Event> {
    let mut upcoming: Vec<Event> = items.iter().filter(|e| e.is_upcoming(today)).cloned().collect();
    upcoming.sort_by_key(Event::held_on);
    upcoming
}

/// The events page layout: one featured event and the rest split by recurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFeed<'a> {
    /// The selected event, or the soonest one.
    pub featured: Option<&'a Event>,
    /// Other recurring events.
    pub weekly: Vec<&'a Event>,
    /// Other one-off events.
    pub explore: Vec<&'a Event>,
}

impl<'a> EventFeed<'a> {
    /// Lay out `events`, featuring `active` if it is present.
    pub fn build(events: &'a [Event], active: Option<&DocumentId>) -> Self {
        let mut sorted: Vec<&Event> = events.iter().collect();
        sorted.sort_by_key(|e| e.held_on());

        let featured = active
            .and_then(|id| sorted.iter().copied().find(|e| &e.id == id))
            .or_else(|| sorted.first().copied());

        let (weekly, explore) = sorted
            .into_iter()
            .filter(|e| featured.is_none_or(|f| f.id != e.id))
            .partition(|e| e.is_recurring);

        Self { featured, weekly, explore }
    }
}

/// Which sermons to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpeakerFilter {
    /// Every speaker.
    #[default]
    All,
    /// Only this speaker.
    Speaker(String),
}

/// Distinct speakers, alphabetically.
pub fn speakers(sermons: &[Sermon]) -> Vec<&str> {
    let mut names: Vec<&str> = sermons.iter().map(|s| s.speaker.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Sermons matching `filter`, order preserved.
pub fn filter_by_speaker<'a>(sermons: &'a [Sermon], filter: &SpeakerFilter) -> Vec<&'a Sermon> {
    match filter {
        SpeakerFilter::All => sermons.iter().collect(),
        SpeakerFilter::Speaker(name) => sermons.iter().filter(|s| &s.speaker == name).collect(),
    }
}

/// Leadership groups by display rank, ascending. Ties keep CMS order.
pub fn sorted_groups(groups: &[LeadershipGroup]) -> Vec<&LeadershipGroup> {
    let mut sorted: Vec<&LeadershipGroup> = groups.iter().collect();
    sorted.sort_by_key(|g| g.order);
    sorted
}

/// Embeddable player URL for YouTube and Facebook video links.
pub fn embed_url(video_url: &str) -> Option<String> {
    if let Some(caps) = RE_YOUTUBE.captures(video_url) {
        return Some(format!("https://www.youtube.com/embed/{}", &caps[1]));
    }

    if video_url.contains("facebook.com") {
        return Some(format!(
            "https://www.facebook.com/plugins/video.php?href={}&show_text=false",
            urlencoding::encode(video_url)
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::dates::parse_datetime;

    fn announcement(id: &str, priority: u8, published: &str, expiry: Option<&str>) -> Announcement {
        Announcement {
            id: DocumentId::new(id),
            title: id.to_string(),
            body: Vec::new(),
            publish_date: published.to_string(),
            expiry_date: expiry.map(String::from),
            priority,
        }
    }

    fn event(id: &str, date: &str, recurring: bool) -> Event {
        Event {
            id: DocumentId::new(id),
            title: id.to_string(),
            date: date.to_string(),
            time: None,
            location: None,
            description: None,
            image_url: None,
            image_alt: None,
            is_recurring: recurring,
        }
    }

    fn sermon(id: &str, speaker: &str) -> Sermon {
        Sermon {
            id: DocumentId::new(id),
            title: id.to_string(),
            date: "2024-01-07".to_string(),
            speaker: speaker.to_string(),
            scripture: None,
            video_url: None,
            thumbnail_url: None,
            thumbnail_alt: None,
        }
    }

    fn ids<'a>(items: impl IntoIterator<Item = &'a Announcement>) -> Vec<&'a str> {
        items.into_iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn expired_announcements_are_excluded() {
        let now = parse_datetime("2024-06-01T12:00:00Z").unwrap();
        let items = vec![
            announcement("expired", 5, "2024-05-01T00:00:00Z", Some("2024-05-31T00:00:00Z")),
            announcement("forever", 1, "2024-05-01T00:00:00Z", None),
            announcement("later", 3, "2024-05-01T00:00:00Z", Some("2024-07-01T00:00:00Z")),
        ];
        assert_eq!(ids(&active_announcements(&items, now)), vec!["later", "forever"]);
    }

    #[test]
    fn announcements_order_by_priority_then_recency() {
        let now = parse_datetime("2024-06-01T12:00:00Z").unwrap();
        let same_day = "2024-05-01T00:00:00Z";
        let items = vec![
            announcement("two", 2, same_day, None),
            announcement("five", 5, same_day, None),
            announcement("three", 3, same_day, None),
        ];
        let ordered = active_announcements(&items, now);
        assert_eq!(ordered.iter().map(|a| a.priority).collect::<Vec<_>>(), vec![5, 3, 2]);

        let items = vec![
            announcement("older", 3, "2024-04-01T00:00:00Z", None),
            announcement("newer", 3, "2024-05-01T00:00:00Z", None),
        ];
        assert_eq!(ids(&active_announcements(&items, now)), vec!["newer", "older"]);
    }

    #[test]
    fn past_events_are_not_upcoming() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let items = vec![
            event("next-month", "2024-07-01", false),
            event("yesterday", "2024-06-09", false),
            event("today", "2024-06-10", false),
            event("undated", "soon", false),
        ];
        let upcoming = upcoming_events(&items, today);
        let names: Vec<&str> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(names, vec!["today", "next-month"]);
    }

    #[test]
    fn event_feed_features_soonest_by_default() {
        let events = vec![
            event("bible-study", "2024-06-12", true),
            event("picnic", "2024-06-20", false),
            event("revival", "2024-06-11", false),
            event("choir", "2024-06-13", true),
        ];

        let feed = EventFeed::build(&events, None);
        assert_eq!(feed.featured.map(|e| e.id.as_str()), Some("revival"));
        assert_eq!(feed.weekly.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["bible-study", "choir"]);
        assert_eq!(feed.explore.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["picnic"]);

        let feed = EventFeed::build(&events, Some(&DocumentId::new("choir")));
        assert_eq!(feed.featured.map(|e| e.id.as_str()), Some("choir"));
        assert_eq!(feed.weekly.len(), 1);
        assert_eq!(feed.explore.len(), 2);

        let feed = EventFeed::build(&events, Some(&DocumentId::new("missing")));
        assert_eq!(feed.featured.map(|e| e.id.as_str()), Some("revival"));

        assert_eq!(EventFeed::build(&[], None), EventFeed::default());
    }

    #[test]
    fn speaker_filter() {
        let sermons = vec![sermon("a", "Rev. Smith"), sermon("b", "Elder Jones"), sermon("c", "Rev. Smith")];
        assert_eq!(speakers(&sermons), vec!["Elder Jones", "Rev. Smith"]);
        assert_eq!(filter_by_speaker(&sermons, &SpeakerFilter::All).len(), 3);
        let smith = filter_by_speaker(&sermons, &SpeakerFilter::Speaker("Rev. Smith".into()));
        assert_eq!(smith.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn groups_sort_by_order() {
        let group = |id: &str, order| LeadershipGroup {
            id: DocumentId::new(id),
            title: id.to_string(),
            description: None,
            order,
            members: Vec::new(),
        };
        let groups = vec![group("deacons", 2), group("pastors", 1), group("trustees", 2)];
        let titles: Vec<&str> = sorted_groups(&groups).iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["pastors", "deacons", "trustees"]);
    }

    #[test]
    fn video_embeds() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(
            embed_url("https://youtu.be/abc-123").as_deref(),
            Some("https://www.youtube.com/embed/abc-123")
        );
        assert_eq!(
            embed_url("https://www.facebook.com/ucc/videos/42").as_deref(),
            Some("https://www.facebook.com/plugins/video.php?href=https%3A%2F%2Fwww.facebook.com%2Fucc%2Fvideos%2F42&show_text=false")
        );
        assert!(embed_url("https://vimeo.com/1").is_none());
    }
}

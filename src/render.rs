//! HTML for resolved page sections.

use maud::{html, Markup, Render};

use crate::dates::{format_datetime_local, format_local_date};
use crate::display::{DisplayState, Fallback};
use crate::feed;
use crate::sanity::image::{DEFAULT_EVENT_IMAGE, DEFAULT_SERMON_THUMBNAIL};
use crate::sanity::{Announcement, Event, LeadershipGroup, Sermon, SiteSettings};

/// Long date format used on cards, e.g. `January 7, 2024`.
pub const DATE_FORMAT: &str = "%B %-d, %Y";

impl Render for Fallback {
    fn render(&self) -> Markup {
        match self {
            Self::Notice(message) => html! {
                div.content-fallback role="alert" { (message) }
            },
            Self::Hidden => html! {},
        }
    }
}

/// Placeholder card shown while a section loads.
pub fn skeleton_card() -> Markup {
    html! {
        div.skeleton-card aria-hidden="true" {
            div.skeleton-media {}
            div.skeleton-line {}
            div.skeleton-line.short {}
        }
    }
}

/// Render one section from its resolved state.
///
/// Success hands the data to `body`; loading renders exactly the requested
/// number of skeleton cards. A hidden fallback renders nothing at all, not
/// even the heading.
pub fn render_section<T>(title: &str, state: &DisplayState<'_, T>, body: impl FnOnce(&T) -> Markup) -> Markup {
    match state {
        DisplayState::Fallback(Fallback::Hidden) => html! {},
        DisplayState::Fallback(fallback) => html! {
            section {
                h2 { (title) }
                (fallback)
            }
        },
        DisplayState::Loading { skeletons } => html! {
            section aria-busy="true" {
                h2 { (title) }
                @for _ in 0..*skeletons {
                    (skeleton_card())
                }
            }
        },
        DisplayState::Success(data) => html! {
            section {
                h2 { (title) }
                (body(data))
            }
        },
    }
}

/// Render a list of cards.
pub fn cards<'a, T: Render + 'a>(items: impl IntoIterator<Item = &'a T>) -> Markup {
    html! {
        div.cards {
            @for item in items {
                (item)
            }
        }
    }
}

impl Render for Sermon {
    fn render(&self) -> Markup {
        let thumbnail = self.thumbnail_url.as_deref().unwrap_or(DEFAULT_SERMON_THUMBNAIL);
        let embed = self.video_url.as_deref().and_then(feed::embed_url);
        html! {
            article.card.sermon data-id=(self.id.as_str()) {
                img src=(thumbnail) alt=(self.thumbnail_alt.as_deref().unwrap_or(&self.title));
                h3 { (self.title) }
                p.meta { (self.speaker) " · " (format_local_date(Some(&self.date), DATE_FORMAT, "Date TBA")) }
                @if let Some(scripture) = &self.scripture {
                    p.scripture { (scripture) }
                }
                @if let Some(embed) = embed {
                    a.watch href=(embed) { "Watch" }
                }
            }
        }
    }
}

impl Render for Event {
    fn render(&self) -> Markup {
        let image = self.image_url.as_deref().unwrap_or(DEFAULT_EVENT_IMAGE);
        html! {
            article.card.event data-id=(self.id.as_str()) {
                img src=(image) alt=(self.image_alt.as_deref().unwrap_or(&self.title));
                h3 { (self.title) }
                p.meta {
                    (format_local_date(Some(&self.date), DATE_FORMAT, "Date TBA"))
                    @if let Some(time) = &self.time { " · " (time) }
                }
                @if let Some(location) = &self.location {
                    p.location { (location) }
                }
                @if let Some(description) = &self.description {
                    p { (description) }
                }
                @if self.is_recurring {
                    span.badge { "Weekly" }
                }
            }
        }
    }
}

impl Render for Announcement {
    fn render(&self) -> Markup {
        html! {
            article.card.announcement data-id=(self.id.as_str()) data-priority=(self.priority) {
                h3 { (self.title) }
                p.meta { (format_datetime_local(Some(&self.publish_date), DATE_FORMAT, "")) }
                p { (self.excerpt()) }
            }
        }
    }
}

impl Render for LeadershipGroup {
    fn render(&self) -> Markup {
        html! {
            article.leadership-group data-id=(self.id.as_str()) {
                h3 { (self.title) }
                @if let Some(description) = &self.description {
                    p { (description) }
                }
                ul {
                    @for leader in &self.members {
                        li {
                            @if let Some(url) = &leader.image_url {
                                img src=(url) alt=(leader.image_alt.as_deref().unwrap_or(&leader.name));
                            }
                            strong { (leader.name) }
                            " " span.role { (leader.role) }
                            @if let Some(bio) = &leader.bio {
                                p.bio { (bio) }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Render for SiteSettings {
    fn render(&self) -> Markup {
        html! {
            address.site-settings {
                @if let Some(name) = &self.church_name { strong { (name) } br; }
                @if let Some(address) = &self.address { (address) br; }
                @if let Some(phone) = &self.phone { a href={ "tel:" (phone) } { (phone) } br; }
                @if let Some(email) = &self.email { a href={ "mailto:" (email) } { (email) } }
            }
            @if !self.service_times.is_empty() {
                ul.service-times {
                    @for service in &self.service_times {
                        li { (service.day) ": " (service.time) }
                    }
                }
            }
        }
    }
}

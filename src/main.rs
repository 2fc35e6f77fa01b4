//! `ucc-content` - fetch one site section and print how it would display.
//!
//! Usage: `ucc-content <section> [--html] [--speaker NAME] [--verbose]`

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, ValueEnum};
use maud::Render;

use ucc_content::config::{Config, QueryOptions};
use ucc_content::constants::display::{
    ANNOUNCEMENT_SKELETONS, EVENT_SKELETONS, LEADERSHIP_SKELETONS, SERMON_SKELETONS,
};
use ucc_content::content::{ContentStore, QueryResult};
use ucc_content::dates::format_local_date;
use ucc_content::display::{DisplayState, Fallback, SectionOptions};
use ucc_content::feed::{self, EventFeed, SpeakerFilter};
use ucc_content::giving::{GivingConfig, PlatformAction, PLATFORMS};
use ucc_content::render::{cards, render_section, DATE_FORMAT};
use ucc_content::sanity::queries::{
    events_params, ANNOUNCEMENTS_QUERY, EVENTS_QUERY, LEADERSHIP_GROUPS_QUERY, SERMONS_QUERY,
    SITE_SETTINGS_QUERY,
};
use ucc_content::sanity::{Announcement, Event, LeadershipGroup, SanityClient, Sermon, SiteSettings};
use ucc_content::types::PlatformId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    /// Sermon archive
    Sermons,
    /// Upcoming events
    Events,
    /// Active announcements
    Announcements,
    /// Church contact details and service times
    Settings,
    /// Leadership groups
    Leadership,
    /// Giving platforms
    Giving,
    /// Announcements, latest sermons and contact details together
    Home,
}

#[derive(Debug, Parser)]
#[command(name = "ucc-content", version, about = "Fetch and display United Community Church site content")]
struct Cli {
    /// Section to fetch
    #[arg(value_enum)]
    section: Section,

    /// Print the rendered HTML instead of a text summary
    #[arg(long)]
    html: bool,

    /// Only list sermons by this speaker
    #[arg(long)]
    speaker: Option<String>,

    /// Log cache activity
    #[arg(short, long)]
    verbose: bool,
}

/// Print a section either as HTML or as plain lines.
fn emit<T>(
    cli: &Cli,
    title: &str,
    state: &DisplayState<'_, T>,
    html: impl FnOnce(&T) -> maud::Markup,
    text: impl FnOnce(&T) -> Vec<String>,
) {
    if cli.html {
        println!("{}", render_section(title, state, html).into_string());
        return;
    }

    match state {
        DisplayState::Fallback(Fallback::Notice(message)) => println!("{title}: {message}"),
        DisplayState::Fallback(Fallback::Hidden) => {}
        DisplayState::Loading { skeletons } => println!("{title}: loading ({skeletons} placeholders)"),
        DisplayState::Success(data) => {
            println!("{title}");
            for line in text(data) {
                println!("  {line}");
            }
        }
    }
}

/// Text lines for the sermons matching `filter`.
fn sermon_lines(all: &[Sermon], filter: &SpeakerFilter) -> Vec<String> {
    let shown = feed::filter_by_speaker(all, filter);
    if shown.is_empty() {
        return vec!["No sermons found for this speaker.".to_string()];
    }
    shown
        .iter()
        .map(|s| format!("{} | {} | {}", format_local_date(Some(&s.date), DATE_FORMAT, "Date TBA"), s.speaker, s.title))
        .collect()
}

fn sermon_options() -> SectionOptions {
    SectionOptions::new(SERMON_SKELETONS)
        .with_fallback(Fallback::notice("Sermons are temporarily unavailable. Please check back soon."))
}

async fn sermons(cli: &Cli, store: &ContentStore) {
    let result: QueryResult<Vec<Sermon>> = store.fetch("sermons", SERMONS_QUERY, None).await;
    let filter = cli.speaker.clone().map_or(SpeakerFilter::All, SpeakerFilter::Speaker);

    // Emptiness is judged on the whole archive; the speaker filter only narrows what is shown.
    let state = DisplayState::resolve(&result, &sermon_options());
    emit(
        cli,
        "Sermons",
        &state,
        |all| cards(feed::filter_by_speaker(all, &filter)),
        |all| sermon_lines(all, &filter),
    );
}

async fn events(cli: &Cli, store: &ContentStore) {
    let today = Local::now().date_naive();
    let params = events_params(today);
    let result: QueryResult<Vec<Event>> = store.fetch("events", EVENTS_QUERY, Some(&params)).await;
    let result = result.map(|all| feed::upcoming_events(&all, today));

    let options = SectionOptions::new(EVENT_SKELETONS);
    let state = DisplayState::resolve(&result, &options);
    emit(cli, "Events", &state, |e| cards(e), |events| {
        let layout = EventFeed::build(events, None);
        let line = |e: &Event| format!("{} | {}", format_local_date(Some(&e.date), DATE_FORMAT, "Date TBA"), e.title);
        let mut lines: Vec<String> = layout.featured.map(|e| format!("featured: {}", line(e))).into_iter().collect();
        lines.extend(layout.weekly.iter().map(|e| format!("weekly:   {}", line(e))));
        lines.extend(layout.explore.iter().map(|e| format!("explore:  {}", line(e))));
        lines
    });
}

async fn announcements(cli: &Cli, store: &ContentStore) {
    let result: QueryResult<Vec<Announcement>> = store.fetch("announcements", ANNOUNCEMENTS_QUERY, None).await;
    let result = result.map(|all| feed::active_announcements(&all, Utc::now()));

    // The home page drops the section entirely rather than showing a banner.
    let options = SectionOptions::new(ANNOUNCEMENT_SKELETONS).with_fallback(Fallback::Hidden);
    let state = DisplayState::resolve(&result, &options);
    emit(cli, "Announcements", &state, |a| cards(a), |items| {
        items.iter().map(|a| format!("[{}] {}: {}", a.priority, a.title, a.excerpt())).collect()
    });
}

async fn settings(cli: &Cli, store: &ContentStore) {
    let result: QueryResult<Option<SiteSettings>> = store.fetch("siteSettings", SITE_SETTINGS_QUERY, None).await;

    let options = SectionOptions::new(1);
    let state = DisplayState::resolve(&result, &options);
    emit(
        cli,
        "Site Settings",
        &state,
        |s| s.as_ref().map_or_else(|| maud::html! {}, Render::render),
        |s| {
            let Some(s) = s else { return Vec::new() };
            let mut lines: Vec<String> = [&s.church_name, &s.address, &s.phone, &s.email]
                .into_iter()
                .flatten()
                .cloned()
                .collect();
            lines.extend(s.service_times.iter().map(|t| format!("{}: {}", t.day, t.time)));
            lines
        },
    );
}

async fn leadership(cli: &Cli, store: &ContentStore) {
    let result: QueryResult<Vec<LeadershipGroup>> =
        store.fetch("leadershipGroups", LEADERSHIP_GROUPS_QUERY, None).await;
    let result = result.map(|groups| feed::sorted_groups(&groups).into_iter().cloned().collect::<Vec<_>>());

    let options = SectionOptions::new(LEADERSHIP_SKELETONS);
    let state = DisplayState::resolve(&result, &options);
    emit(cli, "Leadership", &state, |g| cards(g), |groups| {
        groups
            .iter()
            .flat_map(|g| {
                std::iter::once(g.title.clone())
                    .chain(g.members.iter().map(|m| format!("  {} ({})", m.name, m.role)))
            })
            .collect()
    });
}

async fn giving(config: &Config) {
    let client = reqwest::Client::new();
    let location = config.giving_config_location();
    let giving = GivingConfig::load_or_default(&client, location.as_deref()).await;

    println!("Giving");
    for platform in PLATFORMS {
        match PlatformAction::resolve(&PlatformId::new(platform.id), &giving) {
            PlatformAction::Open(url) => println!("  {}: {url}", platform.name),
            PlatformAction::ComingSoon(message) => println!("  {}: {message}", platform.name),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ucc_content::logging::init_logging(cli.verbose)?;

    let config = Config::load()?;
    tracing::debug!("{} {} ({:?})", config.app_name(), config.app_version(), config.mode);

    let store = ContentStore::new(SanityClient::new(&config), QueryOptions::for_config(&config));

    match cli.section {
        Section::Sermons => sermons(&cli, &store).await,
        Section::Events => events(&cli, &store).await,
        Section::Announcements => announcements(&cli, &store).await,
        Section::Settings => settings(&cli, &store).await,
        Section::Leadership => leadership(&cli, &store).await,
        Section::Giving => giving(&config).await,
        Section::Home => {
            futures::join!(announcements(&cli, &store), sermons(&cli, &store), settings(&cli, &store));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn archive() -> Vec<Sermon> {
        serde_json::from_value(json!([
            {"_id": "s1", "title": "Walking in Faith", "date": "2024-01-07", "speaker": "Rev. Smith"},
            {"_id": "s2", "title": "Hope Renewed", "date": "2024-01-14", "speaker": "Pastor Jones"}
        ]))
        .unwrap()
    }

    #[test]
    fn unknown_speaker_keeps_section_visible() {
        let result = QueryResult::success(archive());
        let state = DisplayState::resolve(&result, &sermon_options());
        assert!(matches!(state, DisplayState::Success(_)));

        let filter = SpeakerFilter::Speaker("Nobody".into());
        assert_eq!(sermon_lines(state.data().unwrap(), &filter), vec!["No sermons found for this speaker."]);
    }

    #[test]
    fn speaker_filter_narrows_lines() {
        let lines = sermon_lines(&archive(), &SpeakerFilter::Speaker("Pastor Jones".into()));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Hope Renewed"));

        assert_eq!(sermon_lines(&archive(), &SpeakerFilter::All).len(), 2);
    }
}

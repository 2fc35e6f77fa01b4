//! HTTP tests for the Sanity client and the content store, against a mock server.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use mockito::{Matcher, Server};
use serde_json::json;

use ucc_content::config::{Config, QueryOptions};
use ucc_content::content::ContentStore;
use ucc_content::display::{DisplayState, Fallback, SectionOptions};
use ucc_content::error::Error;
use ucc_content::giving::{GivingConfig, PlatformAction};
use ucc_content::sanity::queries::{events_params, EVENTS_QUERY, SERMONS_QUERY, SITE_SETTINGS_QUERY};
use ucc_content::sanity::{Event, SanityClient, Sermon, SiteSettings};
use ucc_content::types::PlatformId;

const QUERY_PATH: &str = "/v2026-02-17/data/query/production";

fn client_for(server: &Server) -> SanityClient {
    let mut config = Config::default();
    config.sanity_project_id = "test-project".into();
    SanityClient::new(&config).with_base_url(server.url())
}

fn quick_options(max_retries: u32) -> QueryOptions {
    QueryOptions { max_retries, log_errors: false, ..QueryOptions::default() }
}

#[tokio::test]
async fn unwraps_query_result() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::UrlEncoded("query".into(), SERMONS_QUERY.trim().into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ms": 4,
                "query": SERMONS_QUERY,
                "result": [{
                    "_id": "s1",
                    "title": "Walking in Faith",
                    "date": "2024-01-07",
                    "speaker": "Rev. Smith",
                    "scripture": null,
                    "videoUrl": "https://youtu.be/abc",
                    "thumbnailUrl": null,
                    "thumbnailAlt": null
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let sermons: Vec<Sermon> = client_for(&server).query(SERMONS_QUERY, None).await.unwrap();
    assert_eq!(sermons.len(), 1);
    assert_eq!(sermons[0].speaker, "Rev. Smith");
    assert!(sermons[0].scripture.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn sends_parameters_as_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), EVENTS_QUERY.trim().into()),
            Matcher::UrlEncoded("$today".into(), "\"2024-06-10\"".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"result": []}"#)
        .create_async()
        .await;

    let params = events_params(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    let events: Vec<Event> = client_for(&server).query(EVENTS_QUERY, Some(&params)).await.unwrap();
    assert!(events.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_carries_description_and_hint() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"statusCode": 404, "error": "Not Found", "message": "Dataset not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server).query_value("*[]", None).await.unwrap_err();
    match err {
        Error::Sanity { message, status, hint } => {
            assert_eq!(status, Some(404));
            assert!(message.contains("Dataset not found"));
            assert!(hint.unwrap().contains("SANITY_PROJECT_ID"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_result_is_a_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"ms": 1}"#)
        .create_async()
        .await;

    let err = client_for(&server).query_value("*[]", None).await.unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[tokio::test]
async fn store_serves_cached_singleton() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"result": {"churchName": "United Community Church", "serviceTimes": [{"day": "Sunday", "time": "10:00 AM"}]}})
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let store = ContentStore::new(client_for(&server), quick_options(0));
    for _ in 0..3 {
        let result = store.fetch::<Option<SiteSettings>>("siteSettings", SITE_SETTINGS_QUERY, None).await;
        let settings = result.data.flatten().unwrap();
        assert_eq!(settings.church_name.as_deref(), Some("United Community Church"));
        assert_eq!(settings.service_times.len(), 1);
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn store_retries_then_reports_fallback() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(r#"{"error": "Service Unavailable"}"#)
        .expect(2)
        .create_async()
        .await;

    let store = ContentStore::new(client_for(&server), quick_options(1));
    let result = store.fetch::<Vec<Sermon>>("sermons", SERMONS_QUERY, None).await;
    mock.assert_async().await;

    assert!(!result.is_loading);
    assert!(result.error.as_deref().is_some_and(Error::is_transient));

    let options = SectionOptions::new(6).with_fallback(Fallback::notice("Sermons are unavailable"));
    assert_eq!(
        DisplayState::resolve(&result, &options),
        DisplayState::Fallback(Fallback::notice("Sermons are unavailable"))
    );
}

#[tokio::test]
async fn giving_config_over_http() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/giving-config.json")
        .with_status(200)
        .with_body(r#"{"platforms": {"givelify": {"url": "https://giv.li/ucc", "enabled": true}}, "updatedAt": "2026-01-15"}"#)
        .create_async()
        .await;
    server.mock("GET", "/missing.json").with_status(404).create_async().await;

    let http = reqwest::Client::new();
    let url = format!("{}/giving-config.json", server.url());
    let config = GivingConfig::load_or_default(&http, Some(&url)).await;
    assert_eq!(
        PlatformAction::resolve(&PlatformId::new("givelify"), &config),
        PlatformAction::Open("https://giv.li/ucc".into())
    );

    let missing = format!("{}/missing.json", server.url());
    assert!(GivingConfig::fetch(&http, &missing).await.is_err());
    let fallback = GivingConfig::load_or_default(&http, Some(&missing)).await;
    assert!(matches!(
        PlatformAction::resolve(&PlatformId::new("givelify"), &fallback),
        PlatformAction::ComingSoon(_)
    ));
}

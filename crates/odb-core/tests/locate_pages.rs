//! Integration tests: feed, page and playlist JSON served over real HTTP.

mod common;

use common::page_server::{self, Route};
use odb_core::devotional::{fetch_today, locate_page};
use odb_core::fetch::{CurlFetcher, FetchError, FetchOptions, PageFetcher};
use odb_core::locator::{AudioLocator, AudioReference, DevotionalPage, Strategy};
use std::time::Duration;

const FEED_XML: &str = include_str!("fixtures/feed.xml");
const PLAYLIST_PAGE: &str = include_str!("fixtures/playlist_page.html");

fn fetcher() -> CurlFetcher {
    CurlFetcher::new(FetchOptions {
        user_agent: "Mozilla/5.0".to_string(),
        connect_timeout: Duration::from_secs(2),
        timeout: Duration::from_secs(5),
    })
}

#[test]
fn captured_page_resolves_feed_param() {
    let m = AudioLocator::new()
        .locate_match(&DevotionalPage::new(PLAYLIST_PAGE))
        .expect("audio located");
    assert_eq!(m.url, "https://cdn.odb.example/odb/2026/10/odb-10-18-26.mp3");
    assert_eq!(m.strategy, Strategy::PlaylistFeedParam);
}

#[test]
fn today_follows_feed_to_playlist_json() {
    let server = page_server::start(vec![
        ("/feed/", Route::ok("application/rss+xml", FEED_XML)),
        (
            "/devotional/rooted-in-love/",
            Route::ok(
                "text/html",
                r#"<html><body><div data-url-playlist="{base}?load=playlist.json&#038;id=81234"></div></body></html>"#,
            ),
        ),
        (
            "/",
            Route::ok(
                "application/json",
                r#"{"playlist_name":"Rooted","tracks":[{"file":"{base}audio/rooted.mp3","track_title":"Rooted"}]}"#,
            ),
        ),
    ]);
    let http = fetcher();
    let locator = AudioLocator::new()
        .with_playlist_host(&server.base)
        .unwrap()
        .with_playlist_fetcher(&http);

    let today = fetch_today(&http, &format!("{}feed/", server.base), &locator).unwrap();

    assert_eq!(today.item.title, "Rooted in Love");
    assert_eq!(today.item.creator, "Amy Boucher Pye");
    assert_eq!(
        today.item.image.as_deref(),
        Some(format!("{}wp-content/uploads/rooted.jpg", server.base).as_str())
    );
    let audio = today.audio.expect("audio located");
    assert_eq!(audio.url, format!("{}audio/rooted.mp3", server.base));
    assert_eq!(audio.strategy, Strategy::PlaylistJson);
    assert_eq!(
        server.requests(),
        vec![
            "/feed/".to_string(),
            "/devotional/rooted-in-love/".to_string(),
            "/?load=playlist.json&id=81234".to_string(),
        ]
    );
}

#[test]
fn feed_param_needs_no_secondary_request() {
    let server = page_server::start(vec![(
        "/page",
        Route::ok(
            "text/html",
            r#"<div data-x="{base}?load=playlist.json&#038;feed=https%3A%2F%2Fcdn.example%2Fp.mp3"></div>"#,
        ),
    )]);
    let http = fetcher();
    let locator = AudioLocator::new()
        .with_playlist_host(&server.base)
        .unwrap()
        .with_playlist_fetcher(&http);

    let found = locate_page(&http, &locator, &format!("{}page", server.base)).unwrap();
    assert_eq!(found.map(|m| m.url).as_deref(), Some("https://cdn.example/p.mp3"));
    assert_eq!(server.requests(), vec!["/page".to_string()]);
}

#[test]
fn broken_playlist_json_falls_back_to_mp3_regex() {
    let server = page_server::start(vec![
        (
            "/page",
            Route::ok(
                "text/html",
                r#"<div data-x="{base}?load=playlist.json&#038;id=3"></div><a href="https://cdn.example/backup.mp3">mp3</a>"#,
            ),
        ),
        ("/", Route::ok("text/html", "<html>maintenance</html>")),
    ]);
    let http = fetcher();
    let locator = AudioLocator::new()
        .with_playlist_host(&server.base)
        .unwrap()
        .with_playlist_fetcher(&http);

    let m = locate_page(&http, &locator, &format!("{}page", server.base))
        .unwrap()
        .expect("fallback match");
    assert_eq!(m.url, "https://cdn.example/backup.mp3");
    assert_eq!(m.strategy, Strategy::Mp3Fallback);
}

#[test]
fn unavailable_page_leaves_item_without_audio() {
    let server = page_server::start(vec![
        ("/feed/", Route::ok("application/rss+xml", FEED_XML)),
        ("/devotional/rooted-in-love/", Route::status(503)),
    ]);
    let http = fetcher();
    let today = fetch_today(&http, &format!("{}feed/", server.base), &AudioLocator::new()).unwrap();
    assert_eq!(today.item.title, "Rooted in Love");
    assert_eq!(today.audio_reference(), AudioReference::NotFound);
}

#[test]
fn http_error_status_is_reported() {
    let server = page_server::start(vec![]);
    let err = fetcher()
        .get_text(&format!("{}missing", server.base))
        .unwrap_err();
    match err {
        FetchError::Http { status, .. } => assert_eq!(status, 404),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn download_to_writes_body_and_cleans_up_on_error() {
    let body: Vec<u8> = (0u8..=255).cycle().take(32 * 1024).collect();
    let server = page_server::start(vec![("/a.mp3", Route::ok("audio/mpeg", body.clone()))]);
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("a.mp3");
    let written = fetcher()
        .download_to(&format!("{}a.mp3", server.base), &path)
        .unwrap();
    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&path).unwrap(), body);

    let missing = dir.path().join("missing.mp3");
    assert!(fetcher()
        .download_to(&format!("{}missing.mp3", server.base), &missing)
        .is_err());
    assert!(!missing.exists());
}

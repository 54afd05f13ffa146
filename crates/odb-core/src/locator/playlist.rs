//! Strategy 2: the site's playlist-loader URL.
//!
//! The audio player on the devotional pages is configured with a URL like
//! `https://ourdailybreadministries.ca/?load=playlist.json&#038;feed=<encoded mp3>`.
//! The `feed` parameter is the direct file. Pages without it are resolved by
//! fetching the loader URL and reading `tracks[0].file` from its JSON.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::{AudioMatch, Strategy};
use crate::fetch::PageFetcher;

/// Host prefix of the built-in site's playlist loader.
pub const DEFAULT_PLAYLIST_HOST: &str = "https://ourdailybreadministries.ca/";

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&loader_pattern(DEFAULT_PLAYLIST_HOST)).expect("built-in playlist pattern")
});

fn loader_pattern(host: &str) -> String {
    format!(r#"{}\?load=playlist\.json[^\s"']+"#, regex::escape(host))
}

/// Compiled matcher for one site's playlist-loader URLs.
#[derive(Debug, Clone)]
pub(super) struct PlaylistPattern {
    host: String,
    regex: Regex,
}

impl Default for PlaylistPattern {
    fn default() -> Self {
        Self {
            host: DEFAULT_PLAYLIST_HOST.to_string(),
            regex: DEFAULT_PATTERN.clone(),
        }
    }
}

impl PlaylistPattern {
    pub(super) fn new(host: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            host: host.to_string(),
            regex: Regex::new(&loader_pattern(host))?,
        })
    }

    pub(super) fn host(&self) -> &str {
        &self.host
    }

    /// Runs the playlist strategy: `feed` parameter first, then (if a fetcher
    /// is given and `feed` is absent) the loader's JSON.
    pub(super) fn resolve(
        &self,
        html: &str,
        fetcher: Option<&dyn PageFetcher>,
    ) -> Option<AudioMatch> {
        let raw = self.regex.find(html)?.as_str();
        let loader_url = repair_ampersands(raw);
        tracing::debug!(url = %loader_url, "found playlist loader URL");

        let parsed = match url::Url::parse(&loader_url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("playlist loader URL is malformed ({}); skipping", e);
                return None;
            }
        };

        if let Some(url) = feed_param(&parsed) {
            return Some(AudioMatch {
                url,
                strategy: Strategy::PlaylistFeedParam,
            });
        }

        let fetcher = fetcher?;
        first_track_from_json(fetcher, &loader_url).map(|url| AudioMatch {
            url,
            strategy: Strategy::PlaylistJson,
        })
    }
}

/// Undo HTML escaping of `&` inside an attribute or script string.
fn repair_ampersands(raw: &str) -> String {
    raw.replace("&#038;", "&").replace("&amp;", "&")
}

/// First non-empty `feed` value, percent-decoded.
///
/// `query_pairs` already decodes once; the value is decoded a second time
/// because the site double-encodes it in some templates. Bytes that are not
/// UTF-8 after the second pass become U+FFFD, so a present `feed` always
/// resolves here and never triggers the JSON fetch.
fn feed_param(parsed: &url::Url) -> Option<String> {
    let (_, value) = parsed
        .query_pairs()
        .find(|(k, v)| k == "feed" && !v.is_empty())?;
    let decoded = urlencoding::decode_binary(value.as_bytes());
    Some(String::from_utf8_lossy(&decoded).into_owned())
}

#[derive(Debug, Deserialize)]
struct PlaylistJson {
    #[serde(default)]
    tracks: Vec<PlaylistTrack>,
}

#[derive(Debug, Deserialize)]
struct PlaylistTrack {
    #[serde(default)]
    file: Option<String>,
}

/// Last resort: GET the loader URL and read `tracks[0].file`.
fn first_track_from_json(fetcher: &dyn PageFetcher, loader_url: &str) -> Option<String> {
    let body = match fetcher.get_text(loader_url) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("playlist JSON fetch failed: {}", e);
            return None;
        }
    };
    let playlist: PlaylistJson = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("could not decode playlist JSON: {}", e);
            return None;
        }
    };
    playlist
        .tracks
        .into_iter()
        .next()?
        .file
        .filter(|f| !f.is_empty())
}

//! Audio URL location on a devotional web page.
//!
//! The page is searched by an ordered chain of strategies; the first one that
//! yields a URL wins:
//!
//! 1. `<audio src="...">` in the parsed HTML, returned verbatim.
//! 2. The site's playlist-loader URL (`...?load=playlist.json&feed=...`):
//!    the `feed` query parameter, percent-decoded. When `feed` is missing and
//!    a fetcher is attached, the loader's JSON is fetched and the first
//!    track's `file` is used.
//! 3. Any `http(s)://...mp3` substring in the raw text.
//!
//! Nothing in the chain is fatal: a malformed candidate or a failed
//! secondary fetch only means "no match at this step".

mod fallback;
mod playlist;
mod tag;

use std::fmt;

use crate::fetch::PageFetcher;

pub use playlist::DEFAULT_PLAYLIST_HOST;

use playlist::PlaylistPattern;

/// Raw text of a fetched devotional page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevotionalPage {
    raw_html: String,
}

impl DevotionalPage {
    pub fn new(raw_html: impl Into<String>) -> Self {
        Self {
            raw_html: raw_html.into(),
        }
    }

    pub fn raw_html(&self) -> &str {
        &self.raw_html
    }
}

impl From<String> for DevotionalPage {
    fn from(raw_html: String) -> Self {
        Self { raw_html }
    }
}

/// Outcome of [`AudioLocator::locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioReference {
    Found(String),
    NotFound,
}

impl AudioReference {
    pub fn url(&self) -> Option<&str> {
        match self {
            AudioReference::Found(url) => Some(url),
            AudioReference::NotFound => None,
        }
    }
}

impl From<Option<String>> for AudioReference {
    fn from(url: Option<String>) -> Self {
        url.map_or(AudioReference::NotFound, AudioReference::Found)
    }
}

/// Which step of the chain produced a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AudioTag,
    PlaylistFeedParam,
    PlaylistJson,
    Mp3Fallback,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::AudioTag => "audio_tag",
            Strategy::PlaylistFeedParam => "playlist_feed_param",
            Strategy::PlaylistJson => "playlist_json",
            Strategy::Mp3Fallback => "mp3_fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located URL together with the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioMatch {
    pub url: String,
    pub strategy: Strategy,
}

/// Strategy chain over a [`DevotionalPage`].
///
/// Without a fetcher the locator is a pure function of the page text. With
/// [`with_playlist_fetcher`](Self::with_playlist_fetcher) it may issue one
/// GET for the playlist JSON, and only when the loader URL carries no `feed`.
#[derive(Clone, Default)]
pub struct AudioLocator<'a> {
    playlist: PlaylistPattern,
    fetcher: Option<&'a dyn PageFetcher>,
}

impl fmt::Debug for AudioLocator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioLocator")
            .field("playlist_host", &self.playlist.host())
            .field("playlist_json", &self.fetcher.is_some())
            .finish()
    }
}

impl<'a> AudioLocator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the playlist-JSON last resort, fetching through `fetcher`.
    pub fn with_playlist_fetcher(mut self, fetcher: &'a dyn PageFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Matches playlist-loader URLs under `host` instead of the built-in site.
    pub fn with_playlist_host(mut self, host: &str) -> Result<Self, regex::Error> {
        self.playlist = PlaylistPattern::new(host)?;
        Ok(self)
    }

    /// Returns the best-guess direct audio URL for `page`.
    pub fn locate(&self, page: &DevotionalPage) -> AudioReference {
        self.locate_match(page).map(|m| m.url).into()
    }

    /// Same chain as [`locate`](Self::locate), also reporting the strategy used.
    pub fn locate_match(&self, page: &DevotionalPage) -> Option<AudioMatch> {
        let found = self.run_chain(page.raw_html());
        match &found {
            Some(m) => tracing::info!(strategy = %m.strategy, url = %m.url, "audio URL located"),
            None => tracing::warn!("no audio URL found after checking all strategies"),
        }
        found
    }

    fn run_chain(&self, html: &str) -> Option<AudioMatch> {
        if let Some(url) = tag::audio_tag_src(html) {
            return Some(AudioMatch {
                url,
                strategy: Strategy::AudioTag,
            });
        }

        if let Some(m) = self.playlist.resolve(html, self.fetcher) {
            return Some(m);
        }

        fallback::first_mp3_url(html).map(|url| AudioMatch {
            url,
            strategy: Strategy::Mp3Fallback,
        })
    }
}

//! "Today's devotional": first feed item plus its resolved audio URL.

use anyhow::{Context, Result};

use crate::config::OdbConfig;
use crate::feed::{self, DevotionalItem};
use crate::fetch::PageFetcher;
use crate::locator::{
    AudioLocator, AudioMatch, AudioReference, DevotionalPage, DEFAULT_PLAYLIST_HOST,
};

#[derive(Debug, Clone)]
pub struct Today {
    pub item: DevotionalItem,
    /// Resolved audio and the strategy that found it; None = no playable audio.
    pub audio: Option<AudioMatch>,
}

impl Today {
    pub fn audio_reference(&self) -> AudioReference {
        self.audio.as_ref().map(|m| m.url.clone()).into()
    }
}

/// Builds the locator described by `cfg`, fetching playlist JSON through `fetcher` when enabled.
pub fn locator_from_config<'a>(
    cfg: &OdbConfig,
    fetcher: &'a dyn PageFetcher,
) -> Result<AudioLocator<'a>> {
    let mut locator = AudioLocator::new();
    if let Some(host) = cfg.playlist_host.as_deref() {
        locator = locator
            .with_playlist_host(host)
            .with_context(|| format!("invalid playlist_host {host:?}"))?;
    }
    if cfg.playlist_json_fallback {
        locator = locator.with_playlist_fetcher(fetcher);
    }
    tracing::debug!(
        playlist_host = cfg.playlist_host.as_deref().unwrap_or(DEFAULT_PLAYLIST_HOST),
        playlist_json = cfg.playlist_json_fallback,
        "audio locator configured"
    );
    Ok(locator)
}

/// Fetches the devotional page at `url` and runs the locator on it.
pub fn locate_page(
    fetcher: &dyn PageFetcher,
    locator: &AudioLocator<'_>,
    url: &str,
) -> Result<Option<AudioMatch>> {
    tracing::debug!(url, "fetching devotional page");
    let html = fetcher
        .get_text(url)
        .with_context(|| format!("failed to load devotional page {url}"))?;
    Ok(locator.locate_match(&DevotionalPage::from(html)))
}

/// Feed → first item → devotional page → audio URL.
///
/// A feed failure is an error. A failure loading the devotional page only
/// means there is no audio; the item is still returned.
pub fn fetch_today(
    fetcher: &dyn PageFetcher,
    feed_url: &str,
    locator: &AudioLocator<'_>,
) -> Result<Today> {
    let item = feed::fetch_first_item(fetcher, feed_url)
        .with_context(|| format!("read devotional feed {feed_url}"))?;

    let audio = match locate_page(fetcher, locator, &item.link) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("{:#}", e);
            None
        }
    };

    Ok(Today { item, audio })
}

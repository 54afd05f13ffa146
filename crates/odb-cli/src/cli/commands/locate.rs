//! `odb locate <url>` / `odb locate --file <path>` – run the audio locator on one page.

use anyhow::{Context, Result};
use odb_core::config::OdbConfig;
use odb_core::devotional;
use odb_core::fetch::CurlFetcher;
use odb_core::locator::{AudioLocator, AudioMatch, DevotionalPage};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateTarget {
    Url(String),
    File(PathBuf),
}

pub fn run_locate(cfg: &OdbConfig, target: &LocateTarget, verbose: bool) -> Result<()> {
    let found = match target {
        LocateTarget::Url(url) => {
            let fetcher = CurlFetcher::new(cfg.fetch_options());
            let locator = devotional::locator_from_config(cfg, &fetcher)?;
            devotional::locate_page(&fetcher, &locator, url)?
        }
        LocateTarget::File(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            let mut locator = AudioLocator::new();
            if let Some(host) = cfg.playlist_host.as_deref() {
                locator = locator.with_playlist_host(host)?;
            }
            locator.locate_match(&DevotionalPage::new(html))
        }
    };

    println!("{}", render(found.as_ref(), verbose));
    Ok(())
}

fn render(found: Option<&AudioMatch>, verbose: bool) -> String {
    match found {
        Some(m) if verbose => format!("{}\t({})", m.url, m.strategy),
        Some(m) => m.url.clone(),
        None => "No playable audio was found.".to_string(),
    }
}

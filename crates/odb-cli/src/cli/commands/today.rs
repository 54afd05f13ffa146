//! `odb today` – print today's devotional and where its audio lives.

use anyhow::Result;
use odb_core::config::OdbConfig;
use odb_core::devotional::{self, Today};
use odb_core::fetch::CurlFetcher;

pub fn run_today(cfg: &OdbConfig, feed_url: Option<&str>) -> Result<()> {
    let fetcher = CurlFetcher::new(cfg.fetch_options());
    let locator = devotional::locator_from_config(cfg, &fetcher)?;
    let feed_url = feed_url.unwrap_or(cfg.feed_url.as_str());

    let today = devotional::fetch_today(&fetcher, feed_url, &locator)?;
    print!("{}", render(&today));
    Ok(())
}

fn render(today: &Today) -> String {
    let item = &today.item;
    let mut out = String::new();
    out.push_str(&format!("{}\n", item.title));
    out.push_str(&format!("By: {}\n", item.creator));
    if !item.pub_date.is_empty() {
        out.push_str(&format!("{}\n", item.pub_date));
    }
    if let Some(image) = &item.image {
        out.push_str(&format!("Image: {}\n", image));
    }
    out.push_str(&format!("Link: {}\n", item.link));

    let body = item.description_text();
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
        out.push('\n');
    }

    out.push('\n');
    match &today.audio {
        Some(m) => out.push_str(&format!("Audio: {}\n", m.url)),
        None => out.push_str("No playable audio was found for this devotional.\n"),
    }
    out
}

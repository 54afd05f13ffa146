//! Devotional RSS feed: fetch and read the first item.
//!
//! Two feed shapes are handled: the WordPress feed (image embedded in the
//! description HTML, author in `dc:creator`) and the ODB API feed (an
//! `<image>` element directly on the item).

mod parse;

pub use parse::parse_first_item;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::fetch::{FetchError, PageFetcher};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("fetch feed: {0}")]
    Fetch(#[from] FetchError),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("no items found in feed")]
    NoItems,
    #[error("feed item has no <{0}>")]
    MissingField(&'static str),
}

/// One devotional entry (the first `<item>` of the feed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevotionalItem {
    pub title: String,
    /// Page hosting the audio player.
    pub link: String,
    pub pub_date: String,
    /// `dc:creator`, or `"Unknown"`.
    pub creator: String,
    /// Body HTML.
    pub description: String,
    pub image: Option<String>,
}

impl DevotionalItem {
    /// Description HTML flattened to plain text, one paragraph per line.
    pub fn description_text(&self) -> String {
        html_to_text(&self.description)
    }
}

/// Fetch `feed_url` and parse its first item.
pub fn fetch_first_item(
    fetcher: &dyn PageFetcher,
    feed_url: &str,
) -> Result<DevotionalItem, FeedError> {
    tracing::debug!(url = feed_url, "fetching RSS feed");
    let xml = fetcher.get_text(feed_url)?;
    let item = parse_first_item(xml.as_bytes())?;
    tracing::info!(title = %item.title, creator = %item.creator, date = %item.pub_date, link = %item.link, "feed item");
    Ok(item)
}

static IMG_WITH_SRC: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("img[src]").ok());
static BLOCKS: Lazy<Option<Selector>> =
    Lazy::new(|| Selector::parse("p, h1, h2, h3, h4, h5, h6, li, blockquote").ok());

/// `src` of the first `<img>` in an HTML fragment.
pub(crate) fn first_img_src(html: &str) -> Option<String> {
    let selector = IMG_WITH_SRC.as_ref()?;
    let fragment = Html::parse_fragment(html);
    let src = fragment.select(selector).next()?.value().attr("src")?;
    (!src.is_empty()).then(|| src.to_string())
}

/// Decodes HTML character references (named, decimal and hex) in plain text.
pub(crate) fn decode_html_entities(raw: &str) -> String {
    Html::parse_fragment(raw)
        .root_element()
        .text()
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let blocks: Vec<String> = BLOCKS
        .as_ref()
        .map(|sel| {
            fragment
                .select(sel)
                // Nested blocks (e.g. <p> inside <li>) are covered by their parent.
                .filter(|el| {
                    !el.ancestors()
                        .filter_map(scraper::ElementRef::wrap)
                        .any(|a| sel.matches(&a))
                })
                .map(|el| collapse_whitespace(&el.text().collect::<String>()))
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if blocks.is_empty() {
        collapse_whitespace(&fragment.root_element().text().collect::<String>())
    } else {
        blocks.join("\n\n")
    }
}

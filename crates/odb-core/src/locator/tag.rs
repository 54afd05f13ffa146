//! Strategy 1: the page's own `<audio src>`.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static AUDIO_WITH_SRC: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("audio[src]").ok());

/// `src` of the first `<audio>` element carrying one, if non-empty. Returned as-is.
pub(super) fn audio_tag_src(html: &str) -> Option<String> {
    let selector = AUDIO_WITH_SRC.as_ref()?;
    let document = Html::parse_document(html);
    let src = document.select(selector).next()?.value().attr("src")?;
    if src.is_empty() {
        tracing::debug!("<audio> has an empty src; trying next strategy");
        return None;
    }
    Some(src.to_string())
}

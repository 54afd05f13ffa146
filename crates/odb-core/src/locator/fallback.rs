//! Strategy 3: any absolute `.mp3` URL in the raw text.

use once_cell::sync::Lazy;
use regex::Regex;

static MP3_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"]+\.mp3"#).expect("built-in mp3 pattern"));

/// First `http(s)://...mp3` substring, exactly as it appears in the text.
pub(super) fn first_mp3_url(text: &str) -> Option<String> {
    MP3_URL.find(text).map(|m| m.as_str().to_string())
}

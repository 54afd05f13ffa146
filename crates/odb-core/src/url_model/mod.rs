//! Local filename for a saved devotional audio file.
//!
//! Taken from the audio URL's last path segment, sanitized for Linux.

mod sanitize;

pub use sanitize::sanitize_filename_for_linux;

/// Filename used when the URL yields nothing usable.
pub const DEFAULT_AUDIO_FILENAME: &str = "today_devotional.mp3";

/// Last non-empty path segment of `url`, percent-decoded.
fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode(segment).ok()?;
    Some(decoded.into_owned())
}

/// Derives a safe filename for saving the audio at `url`.
///
/// - `audio_filename("https://cdn.example/2026/10/18/odb-10-18.mp3")` → `"odb-10-18.mp3"`
/// - `audio_filename("https://cdn.example/")` → `"today_devotional.mp3"`
pub fn audio_filename(url: &str) -> String {
    let Some(raw) = last_path_segment(url) else {
        return DEFAULT_AUDIO_FILENAME.to_string();
    };

    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_AUDIO_FILENAME.to_string()
    } else {
        sanitized
    }
}

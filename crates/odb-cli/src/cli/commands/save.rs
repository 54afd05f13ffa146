//! `odb save` – download today's devotional audio.

use anyhow::{Context, Result};
use odb_core::config::OdbConfig;
use odb_core::devotional;
use odb_core::fetch::CurlFetcher;
use odb_core::url_model;
use std::path::{Path, PathBuf};

pub fn run_save(
    cfg: &OdbConfig,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    feed_url: Option<&str>,
) -> Result<()> {
    let fetcher = CurlFetcher::new(cfg.fetch_options());
    let locator = devotional::locator_from_config(cfg, &fetcher)?;
    let feed_url = feed_url.unwrap_or(cfg.feed_url.as_str());

    let today = devotional::fetch_today(&fetcher, feed_url, &locator)?;
    let Some(audio) = today.audio else {
        anyhow::bail!(
            "no playable audio was found for \"{}\" ({})",
            today.item.title,
            today.item.link
        );
    };

    let cwd = std::env::current_dir()?;
    let path = output_path(&audio.url, output, output_dir, cfg.download_dir.as_deref(), &cwd);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }

    let bytes = fetcher
        .download_to(&audio.url, &path)
        .with_context(|| format!("download {}", audio.url))?;
    println!("Saved {} ({} bytes): {}", today.item.title, bytes, path.display());
    Ok(())
}

/// `--output` wins; otherwise `--output-dir`, then the configured download dir, then `cwd`.
fn output_path(
    audio_url: &str,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    config_dir: Option<&Path>,
    cwd: &Path,
) -> PathBuf {
    if let Some(path) = output {
        return path;
    }
    let dir = output_dir
        .or_else(|| config_dir.map(Path::to_path_buf))
        .unwrap_or_else(|| cwd.to_path_buf());
    dir.join(url_model::audio_filename(audio_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://cdn.example/2026/10/odb-10-18-26.mp3";

    #[test]
    fn explicit_output_wins() {
        let p = output_path(
            URL,
            Some(PathBuf::from("/tmp/x.mp3")),
            Some(PathBuf::from("/ignored")),
            Some(Path::new("/also-ignored")),
            Path::new("/cwd"),
        );
        assert_eq!(p, PathBuf::from("/tmp/x.mp3"));
    }

    #[test]
    fn directory_precedence() {
        assert_eq!(
            output_path(URL, None, Some(PathBuf::from("/dl")), Some(Path::new("/cfg")), Path::new("/cwd")),
            PathBuf::from("/dl/odb-10-18-26.mp3")
        );
        assert_eq!(
            output_path(URL, None, None, Some(Path::new("/cfg")), Path::new("/cwd")),
            PathBuf::from("/cfg/odb-10-18-26.mp3")
        );
        assert_eq!(
            output_path("https://cdn.example/", None, None, None, Path::new("/cwd")),
            PathBuf::from("/cwd/today_devotional.mp3")
        );
    }
}

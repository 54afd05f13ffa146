use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;

/// Feed of the Canadian Our Daily Bread site (WordPress RSS).
pub const DEFAULT_FEED_URL: &str = "https://ourdailybreadministries.ca/feed/";

/// Browser-like agent; the site rejects the default libcurl agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_playlist_json_fallback() -> bool {
    true
}

/// Global configuration loaded from `~/.config/odb/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdbConfig {
    /// RSS feed whose first item is "today's" devotional.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// TCP/TLS connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (feed, page and playlist JSON).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Fetch the playlist JSON when a playlist-loader URL has no `feed` parameter.
    #[serde(default = "default_playlist_json_fallback")]
    pub playlist_json_fallback: bool,
    /// Override of the playlist-loader host prefix (e.g. a mirror). None = built-in site.
    #[serde(default)]
    pub playlist_host: Option<String>,
    /// Directory used by `odb save` when no output path is given. None = current directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Default for OdbConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            playlist_json_fallback: default_playlist_json_fallback(),
            playlist_host: None,
            download_dir: None,
        }
    }
}

impl OdbConfig {
    /// HTTP options derived from this config.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("odb")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OdbConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<OdbConfig> {
    if !path.exists() {
        let default_cfg = OdbConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OdbConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

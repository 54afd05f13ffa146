//! HTTP GET over libcurl.
//!
//! The locator and the "today" workflow only see the [`PageFetcher`] trait;
//! [`CurlFetcher`] is the production implementation. Requests are blocking
//! and run on the calling thread.

mod download;
mod error;

pub use error::FetchError;

use std::time::Duration;

use crate::config::DEFAULT_USER_AGENT;

/// Anything that can GET a URL and hand back the body as text.
pub trait PageFetcher {
    fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Per-request settings shared by every GET.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Blocking fetcher backed by a fresh curl easy handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.opts
    }

    /// Easy handle with URL, redirects, agent and timeouts applied.
    fn easy(&self, url: &str) -> Result<curl::easy::Easy, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.opts.user_agent)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        Ok(easy)
    }

    /// GET `url` and return the raw body.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut easy = self.easy(url)?;
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        check_status(url, status)?;
        tracing::debug!(url, status, bytes = body.len(), "GET complete");
        Ok(body)
    }
}

impl PageFetcher for CurlFetcher {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get_bytes(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn check_status(url: &str, status: u32) -> Result<(), FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Http {
            url: url.to_string(),
            status,
        });
    }
    Ok(())
}

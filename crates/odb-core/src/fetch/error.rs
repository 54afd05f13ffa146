//! Fetch error type.

use thiserror::Error;

/// Error returned by an HTTP GET (curl failure, HTTP error status, or local file failure).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, timeout, connection, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// Writing a downloaded body to disk failed.
    #[error("write audio file: {0}")]
    Io(#[from] std::io::Error),
}

//! Single-stream GET into a local file (used to save the devotional audio).

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::{check_status, CurlFetcher, FetchError};

impl CurlFetcher {
    /// Downloads `url` into `path`, returning the number of bytes written.
    ///
    /// The audio files are a few MB, so the overall timeout is lifted to
    /// ten times the configured value for this call. On any failure the
    /// partial file is removed.
    pub fn download_to(&self, url: &str, path: &Path) -> Result<u64, FetchError> {
        let result = self.download_inner(url, path);
        if result.is_err() {
            let _ = fs::remove_file(path);
        }
        result
    }

    fn download_inner(&self, url: &str, path: &Path) -> Result<u64, FetchError> {
        let mut file = File::create(path)?;
        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = self.easy(url)?;
        easy.timeout(self.options().timeout.saturating_mul(10))?;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("audio download write failed: {}", e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err.take() {
            return Err(FetchError::Io(e));
        }
        performed?;

        check_status(url, easy.response_code()?)?;
        file.flush()?;
        tracing::info!(url, path = %path.display(), bytes = written, "audio saved");
        Ok(written)
    }
}

//! Streaming image download.

use std::path::{Path, PathBuf};

use reqwest::Response;
use tokio::io::AsyncWriteExt;

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

use super::CatalogClient;

impl CatalogClient {
    /// Downloads `url` into `dest`, streaming the body chunk by chunk.
    ///
    /// The body goes to a `.part` sibling first and is renamed onto `dest`
    /// only once it was written in full, so a failed download never leaves a
    /// truncated image behind. Uses the same attempt ceiling as every other
    /// request. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ImageFetch`] wrapping the underlying failure
    /// (exhausted retries, or a local write error).
    pub async fn download_image(&self, url: &str, dest: &Path) -> Result<u64, ScraperError> {
        let part = part_path(dest);
        let part = part.as_path();
        retry_with_backoff(self.retry, url, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            match stream_to_file(response, part).await {
                Ok(written) => {
                    tokio::fs::rename(part, dest)
                        .await
                        .map_err(|source| ScraperError::Io {
                            path: dest.to_path_buf(),
                            source,
                        })?;
                    Ok(written)
                }
                Err(e) => {
                    discard_part(part).await;
                    Err(e)
                }
            }
        })
        .await
        .map_err(|source| ScraperError::ImageFetch {
            url: url.to_owned(),
            source: Box::new(source),
        })
    }
}

async fn stream_to_file(mut response: Response, path: &Path) -> Result<u64, ScraperError> {
    let io_err = |source| ScraperError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tokio::fs::File::create(path).await.map_err(io_err)?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    Ok(written)
}

async fn discard_part(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "could not remove partial image");
        }
    }
}

/// `7.jpeg` → `7.jpeg.part`, next to the final file.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

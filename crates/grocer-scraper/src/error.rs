use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Transport failure: connect, timeout, or broken body stream.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed category URL \"{url}\": {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("gave up on {url} after {attempts} attempts: {last}")]
    RetryExhausted {
        url: String,
        attempts: u32,
        #[source]
        last: Box<ScraperError>,
    },

    #[error("image download failed for {url}: {source}")]
    ImageFetch {
        url: String,
        #[source]
        source: Box<ScraperError>,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

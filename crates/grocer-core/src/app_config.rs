use std::path::PathBuf;

/// Runtime settings for one export run.
///
/// Built once at startup by [`crate::load_app_config`]; CLI flags may
/// override the path fields before the run starts.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Storefront origin, e.g. `https://grocery.walmart.com`.
    pub base_url: String,
    pub store_id: u32,
    /// Products requested per list-endpoint call.
    pub page_size: u32,
    /// Total attempts per HTTP request, the first one included.
    pub max_attempts: u32,
    /// Base delay for exponential backoff between attempts. `0` retries immediately.
    pub retry_backoff_base_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Root directory holding `xlsx/` and `images/`.
    pub output_dir: PathBuf,
    /// Newline-separated list of category URLs.
    pub input_path: PathBuf,
    /// Where unprocessed URLs are written when a run aborts.
    pub pending_path: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Directory that receives one spreadsheet per category.
    #[must_use]
    pub fn xlsx_dir(&self) -> PathBuf {
        self.output_dir.join("xlsx")
    }

    /// Parent directory of the per-category image directories.
    #[must_use]
    pub fn images_root(&self) -> PathBuf {
        self.output_dir.join("images")
    }
}

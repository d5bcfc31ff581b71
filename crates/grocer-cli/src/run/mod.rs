//! Run coordination: one category URL after another, resolve → fetch →
//! export, and on the first failure persist whatever is still pending.
//!
//! Every category gets its own output paths, computed from the run config
//! and that category's metadata just before it is fetched.

mod category;
mod pending;
mod prompt;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use grocer_core::AppConfig;
use grocer_scraper::CatalogClient;

/// How a run ended. Startup problems (unreadable input, bad batch input)
/// are returned as errors instead.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RunOutcome {
    /// Every URL was processed.
    Completed { categories: usize },
    /// A category failed; the URLs not yet done were written to `pending_path`.
    Aborted {
        failed_url: String,
        pending: Vec<String>,
        pending_path: PathBuf,
    },
}

/// Processes every URL in `config.input_path` in order.
///
/// In batch mode the input must hold exactly one URL and the page range is
/// read from `prompt_in`.
///
/// # Errors
///
/// Returns an error if the input file cannot be read, batch mode is given
/// anything but one URL, the HTTP client cannot be built, or the pending
/// file cannot be written after a failure.
pub(crate) async fn run<R: BufRead, W: Write>(
    config: &AppConfig,
    batch: bool,
    prompt_in: &mut R,
    prompt_out: &mut W,
) -> anyhow::Result<RunOutcome> {
    let urls = read_category_urls(&config.input_path)?;
    if batch && urls.len() != 1 {
        anyhow::bail!(
            "batch mode needs exactly one category URL in {}, found {}",
            config.input_path.display(),
            urls.len()
        );
    }

    let client = CatalogClient::from_config(config).context("failed to build catalog client")?;

    let mut done: Vec<String> = Vec::new();
    for url in &urls {
        let banner = "-".repeat(url.len() + 10);
        tracing::info!("{banner}");
        tracing::info!("Fetching: {url}");
        tracing::info!("{banner}");

        let mode = if batch {
            category::RangeMode::Prompt {
                input: &mut *prompt_in,
                output: &mut *prompt_out,
            }
        } else {
            category::RangeMode::Full
        };

        match category::process_category(config, &client, url, mode).await {
            Ok(()) => done.push(url.clone()),
            Err(e) => {
                tracing::error!(url = %url, error = %format!("{e:#}"), "category failed; aborting run");
                eprintln!("{e:?}");

                let pending = pending::pending_urls(&urls, &done);
                pending::write_pending(&config.pending_path, &pending)?;
                tracing::info!(
                    count = pending.len(),
                    path = %config.pending_path.display(),
                    "pending urls stored"
                );
                return Ok(RunOutcome::Aborted {
                    failed_url: url.clone(),
                    pending,
                    pending_path: config.pending_path.clone(),
                });
            }
        }
    }

    Ok(RunOutcome::Completed {
        categories: done.len(),
    })
}

/// Reads non-blank, trimmed lines from the input file.
fn read_category_urls(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read category URLs from {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;

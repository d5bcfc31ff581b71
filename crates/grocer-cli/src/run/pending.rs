//! Pending-URL bookkeeping for aborted runs.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

/// URLs from `all` that are not in `done`, in input order, without repeats.
pub(super) fn pending_urls(all: &[String], done: &[String]) -> Vec<String> {
    let done: HashSet<&str> = done.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    all.iter()
        .filter(|url| !done.contains(url.as_str()) && seen.insert(url.as_str()))
        .cloned()
        .collect()
}

/// Writes one URL per line, replacing any previous file.
pub(super) fn write_pending(path: &Path, pending: &[String]) -> anyhow::Result<()> {
    std::fs::write(path, pending.join("\n"))
        .with_context(|| format!("failed to write pending urls to {}", path.display()))
}

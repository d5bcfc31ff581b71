//! One category: resolve, fetch, export.

use std::io::{BufRead, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use grocer_core::{AppConfig, PageRange};
use grocer_export::{export_outcome, ExportSummary};
use grocer_scraper::{load_meta, parse_category_url, CatalogClient, ListPaginator};

use super::prompt::prompt_page_range;

/// Where the page range for a category comes from.
pub(super) enum RangeMode<'a, R, W> {
    /// Every page the catalog reports.
    Full,
    /// Asked for interactively; the spreadsheet name carries the range.
    Prompt { input: &'a mut R, output: &'a mut W },
}

/// Fetches and exports one category URL.
///
/// Whatever was fetched is exported even when the fetch stopped early; the
/// early stop is then reported as an error so the run aborts.
pub(super) async fn process_category<R: BufRead, W: Write>(
    config: &AppConfig,
    client: &CatalogClient,
    url: &str,
    mode: RangeMode<'_, R, W>,
) -> anyhow::Result<()> {
    let target = parse_category_url(url)?;
    let meta = load_meta(client, &target)
        .await
        .with_context(|| format!("failed to load category metadata for {url}"))?;

    let (range, suffix) = match mode {
        RangeMode::Full => (PageRange::full(meta.total_page_count), None),
        RangeMode::Prompt { input, output } => {
            let range = prompt_page_range(input, output, meta.total_page_count)?;
            (range, Some(range))
        }
    };

    let xlsx_dir = config.xlsx_dir();
    let image_dir = join_component(&config.images_root(), &target.image_dir_name(&meta))?;
    let path = join_component(&xlsx_dir, &target.spreadsheet_file_name(&meta, suffix))?;
    for dir in [&xlsx_dir, &image_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    tracing::info!(
        from = range.from,
        to = range.to,
        total_pages = meta.total_page_count,
        "fetching category pages"
    );
    let outcome = ListPaginator::new(client, &image_dir)
        .run(&target, range)
        .await;

    let summary = export_outcome(&outcome, &meta, &target, &path)?;
    if let ExportSummary::Written { rows, .. } = &summary {
        tracing::info!(rows, path = %path.display(), "category exported");
    }

    if outcome.had_error {
        anyhow::bail!(
            "fetch for {url} stopped early after {} products",
            outcome.records.len()
        );
    }
    Ok(())
}

/// Joins `name` onto `dir`, refusing anything but a single plain component
/// so category names can never point outside the output tree.
fn join_component(dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(dir.join(name)),
        _ => anyhow::bail!("{name:?} is not a usable file name under {}", dir.display()),
    }
}

//! Category URL classification and metadata lookup.

use grocer_core::{CategoryKind, CategoryMeta, CategoryTarget};
use reqwest::Url;

use crate::client::CatalogClient;
use crate::error::ScraperError;

/// Classifies a category URL by its query string.
///
/// A non-empty `aisle` parameter makes a [`CategoryKind::Node`]; otherwise a
/// non-empty `shelfId` makes a [`CategoryKind::Shelf`]. `aisle` wins when
/// both are present.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedUrl`] if the URL does not parse or
/// carries neither parameter.
pub fn parse_category_url(url: &str) -> Result<CategoryTarget, ScraperError> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).map_err(|e| ScraperError::MalformedUrl {
        url: trimmed.to_owned(),
        reason: e.to_string(),
    })?;

    let param = |name: &str| -> Option<String> {
        parsed
            .query_pairs()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    };

    let (kind, identifier) = if let Some(aisle) = param("aisle") {
        (CategoryKind::Node, aisle)
    } else if let Some(shelf_id) = param("shelfId") {
        (CategoryKind::Shelf, shelf_id)
    } else {
        return Err(ScraperError::MalformedUrl {
            url: trimmed.to_owned(),
            reason: "expected an `aisle` or `shelfId` query parameter".to_owned(),
        });
    };

    Ok(CategoryTarget {
        kind,
        identifier,
        source_url: trimmed.to_owned(),
    })
}

/// Loads display names and counts for `target` with a single one-product
/// browse call, retried like every other request.
///
/// The first two `browseTitles` become the primary and secondary names;
/// missing entries are empty strings.
///
/// # Errors
///
/// Propagates [`CatalogClient::fetch_list_page`] errors.
pub async fn load_meta(
    client: &CatalogClient,
    target: &CategoryTarget,
) -> Result<CategoryMeta, ScraperError> {
    let response = client.fetch_list_page(target, 1, 1).await?;

    let mut titles = response
        .browse_titles
        .into_iter()
        .map(|t| t.name.trim().to_owned());
    let primary_name = titles.next().unwrap_or_default();
    let secondary_name = titles.next().unwrap_or_default();

    let shelf_name = match target.kind {
        CategoryKind::Shelf => response
            .shelf_name
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty()),
        CategoryKind::Node => None,
    };

    let total_product_count = response.total_count;
    let total_page_count = CategoryMeta::page_count(total_product_count, client.page_size());

    tracing::info!(
        identifier = %target.identifier,
        primary = %primary_name,
        secondary = %secondary_name,
        total_product_count,
        total_page_count,
        "loaded category metadata"
    );

    Ok(CategoryMeta {
        primary_name,
        secondary_name,
        shelf_name,
        total_product_count,
        total_page_count,
    })
}

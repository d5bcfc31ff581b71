//! Page-by-page walk over a category's browse results.
//!
//! The walk is strictly sequential: one page, then each product on it in
//! response order, then the next page. A failure anywhere stops the walk
//! but never discards what was already collected; the caller gets the
//! records gathered so far together with `had_error = true`.

use std::path::Path;

use grocer_core::{CategoryTarget, FetchOutcome, PageRange, ProductRecord};

use crate::client::CatalogClient;
use crate::detail::DetailFetcher;
use crate::error::ScraperError;

/// Progress is logged every this many products.
const PROGRESS_EVERY: usize = 10;

pub struct ListPaginator<'a> {
    client: &'a CatalogClient,
    image_dir: &'a Path,
}

impl<'a> ListPaginator<'a> {
    #[must_use]
    pub fn new(client: &'a CatalogClient, image_dir: &'a Path) -> Self {
        Self { client, image_dir }
    }

    /// Fetches every product on pages `range.from..=range.to`.
    ///
    /// Stops early, without error, when a page comes back with no products.
    /// Any error ends the walk and sets `had_error`; records fetched before
    /// it are returned.
    pub async fn run(&self, target: &CategoryTarget, range: PageRange) -> FetchOutcome {
        let mut records = Vec::new();
        let had_error = match self.collect(target, range, &mut records).await {
            Ok(()) => false,
            Err(e) => {
                tracing::error!(
                    url = %target.source_url,
                    fetched = records.len(),
                    error = %e,
                    "category fetch stopped early; keeping partial results"
                );
                true
            }
        };
        FetchOutcome { records, had_error }
    }

    async fn collect(
        &self,
        target: &CategoryTarget,
        range: PageRange,
        records: &mut Vec<ProductRecord>,
    ) -> Result<(), ScraperError> {
        let detail = DetailFetcher::new(self.client, self.image_dir);

        for page in range.from..=range.to {
            let response = self
                .client
                .fetch_list_page(target, page, self.client.page_size())
                .await?;

            if response.products.is_empty() {
                tracing::info!(page, "page returned no products; stopping");
                break;
            }

            tracing::info!(page, products = response.products.len(), "fetching page");
            for product in &response.products {
                let record = detail
                    .fetch(&product.us_item_id, &product.basic.product_url)
                    .await?;
                records.push(record);

                if records.len() % PROGRESS_EVERY == 0 {
                    tracing::info!(count = records.len(), "products fetched so far");
                }
            }
        }

        Ok(())
    }
}

//! HTTP client for the storefront's browse, product-detail, and image URLs.

mod endpoints;
mod image;

use std::time::Duration;

use grocer_core::{AppConfig, CategoryTarget};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::types::{ListResponse, ProductDetail};

/// HTTP client for one storefront and store.
///
/// Every request is retried under the same [`RetryPolicy`]. The client only
/// reports failures; deciding which ones abort the run is left to
/// [`crate::DetailFetcher`] and [`crate::ListPaginator`].
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    store_id: u32,
    page_size: u32,
    retry: RetryPolicy,
}

impl CatalogClient {
    /// Creates a client from the run configuration.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    /// - [`ScraperError::InvalidBaseUrl`] if `config.base_url` does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            store_id: config.store_id,
            page_size: config.page_size,
            retry: RetryPolicy::new(config.max_attempts, config.retry_backoff_base_ms),
        })
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetches one browse page for `target`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RetryExhausted`] when every attempt failed.
    /// - [`ScraperError::Deserialize`] if a 2xx body is not the expected JSON.
    pub async fn fetch_list_page(
        &self,
        target: &CategoryTarget,
        page: u32,
        count: u32,
    ) -> Result<ListResponse, ScraperError> {
        let url = self.list_url(target, page, count);
        self.get_json(&url, &format!("browse page {page} of {}", target.identifier))
            .await
    }

    /// Fetches the full detail record for one product.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RetryExhausted`] when every attempt failed.
    /// - [`ScraperError::Deserialize`] if a 2xx body is not the expected JSON.
    pub async fn fetch_product_detail(
        &self,
        product_id: &str,
    ) -> Result<ProductDetail, ScraperError> {
        let url = self.detail_url(product_id);
        self.get_json(&url, &format!("product {product_id}")).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, ScraperError> {
        retry_with_backoff(self.retry, url, || async move {
            let response = self
                .client
                .get(url)
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json")
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;

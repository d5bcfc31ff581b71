//! Per-product detail fetch, field extraction, and image download.

use std::path::Path;

use grocer_core::ProductRecord;

use crate::client::CatalogClient;
use crate::error::ScraperError;
use crate::text::{format_details, image_extension};
use crate::types::{price_value, ProductDetail};

/// Sentinel for missing text fields.
pub const MISSING: &str = "NA";

/// Fetches product details and saves their images into one category's
/// image directory.
///
/// A detail fetch that exhausts its retries is returned as an error and is
/// meant to stop the run. Image failures are logged and swallowed.
pub struct DetailFetcher<'a> {
    client: &'a CatalogClient,
    image_dir: &'a Path,
}

impl<'a> DetailFetcher<'a> {
    #[must_use]
    pub fn new(client: &'a CatalogClient, image_dir: &'a Path) -> Self {
        Self { client, image_dir }
    }

    /// Fetches `product_id`, downloads its primary image, and returns the
    /// extracted record.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RetryExhausted`] if the detail request never succeeded.
    /// - [`ScraperError::Deserialize`] if the detail body is not valid JSON.
    pub async fn fetch(
        &self,
        product_id: &str,
        relative_url: &str,
    ) -> Result<ProductRecord, ScraperError> {
        let detail = self.client.fetch_product_detail(product_id).await?;
        let record = build_record(detail, self.client.product_page_url(relative_url));

        if record.image_url != MISSING {
            self.save_image(product_id, &record.image_url).await;
        }
        Ok(record)
    }

    async fn save_image(&self, product_id: &str, url: &str) {
        let file_name = format!("{product_id}.{}", image_extension(url));
        let dest = self.image_dir.join(file_name);
        match self.client.download_image(url, &dest).await {
            Ok(bytes) => {
                tracing::debug!(product_id, bytes, path = %dest.display(), "saved product image");
            }
            Err(e) => {
                tracing::error!(product_id, url, error = %e, "skipping product image");
            }
        }
    }
}

/// Maps a detail response onto a [`ProductRecord`].
///
/// Missing text becomes [`MISSING`]; missing or non-numeric prices become
/// `None`.
#[must_use]
pub fn build_record(detail: ProductDetail, product_url: String) -> ProductRecord {
    let formatted_details = format_details(&detail.detailed);

    let product_code = match detail.detailed.get("productCode") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => MISSING.to_owned(),
    };

    let (name, image_url) = match detail.basic {
        Some(basic) => (
            basic.name,
            basic.image.and_then(|image| image.large).filter(|u| !u.is_empty()),
        ),
        None => (None, None),
    };

    let price = detail.store.and_then(|store| store.price);
    let mrp = price_value(price.as_ref().and_then(|p| p.previous_price.as_ref()));
    let cost_price = price_value(price.as_ref().and_then(|p| p.display_price.as_ref()));
    let unit_weight_label = price.and_then(|p| p.display_unit_price);

    let nutrition_facts = detail
        .nutrition_facts
        .map_or_else(|| MISSING.to_owned(), |facts| facts.to_string());

    ProductRecord {
        sku: detail.sku.unwrap_or_else(|| MISSING.to_owned()),
        product_code,
        name: name.unwrap_or_else(|| MISSING.to_owned()),
        mrp,
        cost_price,
        unit_weight_label: unit_weight_label.unwrap_or_else(|| MISSING.to_owned()),
        image_url: image_url.unwrap_or_else(|| MISSING.to_owned()),
        formatted_details,
        nutrition_facts,
        product_url,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn detail(value: serde_json::Value) -> ProductDetail {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn build_record_extracts_every_field() {
        let record = build_record(
            detail(json!({
                "sku": "44390948",
                "detailed": {
                    "productCode": "4011",
                    "brand": "Fresh Produce",
                    "description": "<p>Sweet &amp; ripe</p>"
                },
                "basic": {
                    "name": "Bananas, each",
                    "image": {"large": "https://i5.walmartimages.com/asr/b.jpeg?odnHeight=450"}
                },
                "store": {"price": {
                    "previousPrice": 0.3,
                    "displayPrice": "0.25",
                    "displayUnitPrice": "$0.58/lb"
                }},
                "nutritionFacts": {"calories": 105}
            })),
            "https://grocery.walmart.com/ip/Bananas/44390948".to_owned(),
        );

        assert_eq!(record.sku, "44390948");
        assert_eq!(record.product_code, "4011");
        assert_eq!(record.name, "Bananas, each");
        assert_eq!(record.mrp, Some(0.3));
        assert_eq!(record.cost_price, Some(0.25));
        assert_eq!(record.unit_weight_label, "$0.58/lb");
        assert_eq!(
            record.image_url,
            "https://i5.walmartimages.com/asr/b.jpeg?odnHeight=450"
        );
        assert_eq!(
            record.formatted_details,
            "Brand:\n\tFresh Produce\n\nDescription:\n\tSweet & ripe\n\n"
        );
        assert_eq!(record.nutrition_facts, r#"{"calories":105}"#);
        assert_eq!(
            record.product_url,
            "https://grocery.walmart.com/ip/Bananas/44390948"
        );
    }

    #[test]
    fn build_record_defaults_missing_sections() {
        let record = build_record(detail(json!({})), "https://x.test/ip/1".to_owned());
        assert_eq!(record.sku, MISSING);
        assert_eq!(record.product_code, MISSING);
        assert_eq!(record.name, MISSING);
        assert_eq!(record.mrp, None);
        assert_eq!(record.cost_price, None);
        assert_eq!(record.unit_weight_label, MISSING);
        assert_eq!(record.image_url, MISSING);
        assert_eq!(record.formatted_details, "");
        assert_eq!(record.nutrition_facts, MISSING);
    }

    #[test]
    fn build_record_treats_empty_image_url_as_missing() {
        let record = build_record(
            detail(json!({"basic": {"name": "Milk", "image": {"large": ""}}})),
            String::new(),
        );
        assert_eq!(record.name, "Milk");
        assert_eq!(record.image_url, MISSING);
    }

    #[test]
    fn build_record_keeps_price_section_partially() {
        let record = build_record(
            detail(json!({"store": {"price": {"displayPrice": 3.48}}})),
            String::new(),
        );
        assert_eq!(record.mrp, None);
        assert_eq!(record.cost_price, Some(3.48));
        assert_eq!(record.unit_weight_label, MISSING);
    }
}

//! URL construction for the storefront endpoints.

use grocer_core::{CategoryKind, CategoryTarget};

use super::CatalogClient;

impl CatalogClient {
    /// `{base}/v4/api/products/browse?count=..&page=..&storeId=..` plus
    /// `taxonomyNodeId` or `shelfId` depending on the target kind.
    pub(crate) fn list_url(&self, target: &CategoryTarget, page: u32, count: u32) -> String {
        let mut url = self.base_url.clone();
        url.set_path("/v4/api/products/browse");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("count", &count.to_string())
                .append_pair("page", &page.to_string())
                .append_pair("storeId", &self.store_id.to_string());
            match target.kind {
                CategoryKind::Node => query.append_pair("taxonomyNodeId", &target.identifier),
                CategoryKind::Shelf => query.append_pair("shelfId", &target.identifier),
            };
        }
        url.to_string()
    }

    /// `{base}/v3/api/products/{id}?itemFields=all&storeId=..`
    pub(crate) fn detail_url(&self, product_id: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .clear()
                .extend(["v3", "api", "products", product_id]);
        }
        url.query_pairs_mut()
            .append_pair("itemFields", "all")
            .append_pair("storeId", &self.store_id.to_string());
        url.to_string()
    }

    /// Absolute product page URL from the relative path in a browse entry.
    #[must_use]
    pub fn product_page_url(&self, relative: &str) -> String {
        let origin = self.base_url.as_str().trim_end_matches('/');
        if relative.is_empty() {
            return origin.to_owned();
        }
        if relative.starts_with('/') {
            format!("{origin}{relative}")
        } else {
            format!("{origin}/{relative}")
        }
    }
}

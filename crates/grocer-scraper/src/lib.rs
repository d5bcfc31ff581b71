pub mod client;
pub mod detail;
pub mod error;
pub mod pagination;
pub mod resolve;
pub mod retry;
pub mod text;
pub mod types;

pub use client::CatalogClient;
pub use detail::DetailFetcher;
pub use error::ScraperError;
pub use pagination::ListPaginator;
pub use resolve::{load_meta, parse_category_url};
pub use retry::RetryPolicy;
pub use types::{ListProduct, ListResponse, ProductDetail};

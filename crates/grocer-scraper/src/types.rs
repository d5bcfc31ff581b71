//! Response shapes for the storefront's browse and product endpoints.
//!
//! Every section is optional in practice: products without images, stores
//! without a price block, categories without breadcrumbs. Missing keys
//! deserialize to `None` or empty so extraction never fails on absence.
//! Identifiers and prices have been observed both as JSON strings and as
//! numbers, so those go through lenient helpers.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Response from `GET /v4/api/products/browse`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<ListProduct>,

    /// Breadcrumb-like category titles, outermost first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub browse_titles: Vec<BrowseTitle>,

    /// Total products in the category across all pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_count: u64,

    /// Display name for shelf queries.
    #[serde(default)]
    pub shelf_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BrowseTitle {
    #[serde(default)]
    pub name: String,
}

/// One entry in a browse page. Only the identifier and relative URL are
/// used; the detail endpoint supplies everything else.
#[derive(Debug, Deserialize)]
pub struct ListProduct {
    #[serde(rename = "USItemId", deserialize_with = "string_or_number")]
    pub us_item_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub basic: ListProductBasic,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductBasic {
    /// Path relative to the storefront origin, e.g. `/ip/Bananas/44390948`.
    #[serde(default)]
    pub product_url: String,
}

/// Response from `GET /v3/api/products/{id}?itemFields=all`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub sku: Option<String>,

    /// Free-form attribute map (`brand`, `description`, `productCode`, ...).
    /// Values are usually HTML strings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub detailed: Map<String, Value>,

    #[serde(default)]
    pub basic: Option<DetailBasic>,

    #[serde(default)]
    pub store: Option<StoreSection>,

    /// Kept as raw JSON; exported verbatim as text.
    #[serde(default)]
    pub nutrition_facts: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailBasic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<DetailImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailImage {
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreSection {
    #[serde(default)]
    pub price: Option<StorePrice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePrice {
    /// List price before discount. Number or numeric string.
    #[serde(default)]
    pub previous_price: Option<Value>,
    /// Current selling price. Number or numeric string.
    #[serde(default)]
    pub display_price: Option<Value>,
    /// Unit/weight label such as `"$0.58/lb"`.
    #[serde(default)]
    pub display_unit_price: Option<String>,
}

/// Reads a JSON number or numeric string as `f64`, tolerating a leading `$`.
#[must_use]
pub fn price_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('$').replace(',', "").parse().ok(),
        _ => None,
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

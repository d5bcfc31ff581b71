//! Row layout for the exported worksheet.
//!
//! Rows are built as plain values first so the layout can be checked
//! without opening a workbook. Building twice from the same input gives
//! identical rows.

use grocer_core::{CategoryMeta, CategoryTarget, ProductRecord};

/// Worksheet header, in column order.
pub const COLUMNS: [&str; 12] = [
    "sku",
    "name",
    "category",
    "sub_category",
    "mrp",
    "cost_price",
    "weight",
    "details",
    "nutrition_facts",
    "url_image",
    "url_product",
    "url_category",
];

/// One worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Left blank, e.g. a price the catalog did not report.
    Empty,
}

impl Cell {
    fn text(s: &str) -> Self {
        Cell::Text(s.to_owned())
    }

    fn price(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

/// Builds one row per record in record order.
///
/// `category`, `sub_category`, and `url_category` are the same on every
/// row: they come from the category, not the product.
#[must_use]
pub fn build_rows(
    records: &[ProductRecord],
    meta: &CategoryMeta,
    target: &CategoryTarget,
) -> Vec<[Cell; COLUMNS.len()]> {
    let category = meta.category_label();
    records
        .iter()
        .map(|r| {
            [
                Cell::text(&r.sku),
                Cell::text(&r.name),
                Cell::text(category),
                Cell::text(&meta.secondary_name),
                Cell::price(r.mrp),
                Cell::price(r.cost_price),
                Cell::text(&r.unit_weight_label),
                Cell::text(&r.formatted_details),
                Cell::text(&r.nutrition_facts),
                Cell::text(&r.image_url),
                Cell::text(&r.product_url),
                Cell::text(&target.source_url),
            ]
        })
        .collect()
}

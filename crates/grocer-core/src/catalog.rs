use serde::{Deserialize, Serialize};

/// How a category URL addresses the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    /// Taxonomy-tree node, addressed by the `aisle` query parameter.
    Node,
    /// Alternate grouping, addressed by the `shelfId` query parameter.
    Shelf,
}

/// A parsed category URL. Immutable once built by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTarget {
    pub kind: CategoryKind,
    pub identifier: String,
    pub source_url: String,
}

/// Display names and counts for one category, learned from a single
/// list-endpoint call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub primary_name: String,
    /// Empty when the catalog reports only one breadcrumb level.
    pub secondary_name: String,
    /// Display name reported for shelf targets, if any.
    pub shelf_name: Option<String>,
    pub total_product_count: u64,
    pub total_page_count: u32,
}

impl CategoryMeta {
    /// `ceil(total_product_count / page_size)`, saturating at `u32::MAX`.
    ///
    /// A `page_size` of zero yields zero pages.
    #[must_use]
    pub fn page_count(total_product_count: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        let pages = total_product_count.div_ceil(u64::from(page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Value for the `category` column: the first breadcrumb, or the shelf
    /// name when the catalog returned no breadcrumbs.
    #[must_use]
    pub fn category_label(&self) -> &str {
        if self.primary_name.is_empty() {
            self.shelf_name.as_deref().unwrap_or_default()
        } else {
            &self.primary_name
        }
    }
}

/// Characters that may not appear in a file-name component on common
/// filesystems.
const FORBIDDEN_IN_FILE_NAME: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turns a display name into a single file-name component.
///
/// Spaces, path separators, reserved characters and control characters
/// become `-`, as do leading dots, so the result never names a parent or
/// hidden entry.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut leading = true;
    name.trim()
        .chars()
        .map(|c| {
            let replace = c == ' '
                || c.is_control()
                || FORBIDDEN_IN_FILE_NAME.contains(&c)
                || (leading && c == '.');
            leading &= c == '.';
            if replace {
                '-'
            } else {
                c
            }
        })
        .collect()
}

impl CategoryTarget {
    /// Name of the per-category image directory under `images/`.
    ///
    /// Node targets without a breadcrumb fall back to `node_id_{identifier}`.
    #[must_use]
    pub fn image_dir_name(&self, meta: &CategoryMeta) -> String {
        match self.kind {
            CategoryKind::Node if meta.primary_name.trim().is_empty() => self.node_fallback_name(),
            CategoryKind::Node => slugify(&meta.primary_name),
            CategoryKind::Shelf => format!("shelf_id_{}", slugify(&self.identifier)),
        }
    }

    /// Spreadsheet file name, with an optional `_{from}_{to}` suffix for
    /// page-range exports.
    #[must_use]
    pub fn spreadsheet_file_name(&self, meta: &CategoryMeta, range: Option<PageRange>) -> String {
        let stem = match self.kind {
            CategoryKind::Node
                if meta.primary_name.trim().is_empty() && meta.secondary_name.trim().is_empty() =>
            {
                self.node_fallback_name()
            }
            CategoryKind::Node => format!(
                "{}_{}",
                slugify(&meta.primary_name),
                slugify(&meta.secondary_name)
            ),
            CategoryKind::Shelf => format!("shelf_id_{}", slugify(&self.identifier)),
        };
        match range {
            Some(range) => format!("{stem}{}.xlsx", range.file_suffix()),
            None => format!("{stem}.xlsx"),
        }
    }

    fn node_fallback_name(&self) -> String {
        format!("node_id_{}", slugify(&self.identifier))
    }
}

/// Inclusive, 1-based page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub from: u32,
    pub to: u32,
}

impl PageRange {
    /// `[1, total_page_count]`. Empty when the category has no pages.
    #[must_use]
    pub fn full(total_page_count: u32) -> Self {
        Self {
            from: 1,
            to: total_page_count,
        }
    }

    /// Builds a range that lies within `[1, total_page_count]`.
    ///
    /// Returns `None` when `from > to` or either bound falls outside.
    #[must_use]
    pub fn within(from: u32, to: u32, total_page_count: u32) -> Option<Self> {
        if from == 0 || from > to || to > total_page_count {
            return None;
        }
        Some(Self { from, to })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    #[must_use]
    pub fn file_suffix(&self) -> String {
        format!("_{}_{}", self.from, self.to)
    }
}

/// One exported product. Field order mirrors the worksheet, minus the
/// per-category constant columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: String,
    pub product_code: String,
    pub name: String,
    pub mrp: Option<f64>,
    pub cost_price: Option<f64>,
    pub unit_weight_label: String,
    pub image_url: String,
    pub formatted_details: String,
    /// Raw JSON text of the `nutritionFacts` section.
    pub nutrition_facts: String,
    pub product_url: String,
}

/// Everything the paginator gathered for one category.
///
/// `records` keeps page-then-position order. `had_error` is set when the
/// loop stopped early; the records gathered before the failure are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub records: Vec<ProductRecord>,
    pub had_error: bool,
}

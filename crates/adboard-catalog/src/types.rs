//! Response types for the remote catalog source.
//!
//! ## Observed shape from the live API (dummyjson.com)
//!
//! Every listing endpoint (`/products`, `/products/category/{slug}`,
//! `/products/search`) wraps results in the same envelope:
//! `{"products": [...], "total": N, "skip": N, "limit": N}`. The single-item
//! endpoint returns a bare product object.
//!
//! ### `brand`
//! Present on most items but absent on some (groceries in particular carry no
//! brand at all). Modeled as `Option<String>`; brand filtering treats absent
//! as "matches no brand".
//!
//! ### `availabilityStatus`
//! A display string, not an enum: `"In Stock"`, `"Low Stock"`, or
//! `"Out of Stock"` in observed responses. The in-stock filter matches the
//! `"In Stock"` literal exactly.
//!
//! ### `limit=0` sentinel
//! Requesting `?limit=0` returns the entire catalog in one envelope with
//! `limit` echoed back as the full count. This is the hook composite-mode
//! queries rely on.
//!
//! ### Detail fields
//! `tags`, `sku`, `warrantyInformation`, `shippingInformation`,
//! `returnPolicy` and `reviews` appear on the single-item endpoint and full
//! listings alike, but older fixtures omit them, so everything beyond the
//! listing core is `#[serde(default)]`. Remaining response fields (weight,
//! dimensions, meta) are ignored.

use serde::Deserialize;

/// A single item from the remote catalog. Owned by the remote source; the
/// client only reads it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    /// Absent on unbranded items (e.g. groceries).
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Display string: `"In Stock"`, `"Low Stock"`, or `"Out of Stock"`.
    #[serde(default)]
    pub availability_status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub warranty_information: Option<String>,
    #[serde(default)]
    pub shipping_information: Option<String>,
    #[serde(default)]
    pub return_policy: Option<String>,
    #[serde(default)]
    pub reviews: Vec<ItemReview>,
}

impl CatalogItem {
    /// Whether this item counts as in stock for the stock-only filter.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.availability_status == "In Stock"
    }

    /// Case-insensitive substring match against title or description.
    #[must_use]
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

/// A review attached to a catalog item on the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReview {
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub reviewer_name: String,
}

/// Wire envelope returned by every listing endpoint.
#[derive(Debug, Deserialize)]
pub struct CatalogPageEnvelope {
    pub products: Vec<CatalogItem>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// One normalized page of results, as produced by the query composer.
///
/// `total` counts every item matching the filter, not just the items on this
/// page, so `items.len() <= page_size` and the page count is derived from
/// `total` alone.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total: u64,
    pub page_size: u32,
}

impl CatalogPage {
    /// Number of pages needed to show `total` items at this page size.
    /// Zero when the result set is empty.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

//! The query composer: reconciles a [`FilterState`] against a remote source
//! that has no combined filter+sort+paginate endpoint.
//!
//! The remote source natively answers exactly one dimension at a time (plain
//! listing, one category, or one search term), with no brand filter, no
//! stock filter, and no sort. [`query_plan`] decides whether a request fits
//! one native endpoint (**simple mode**) or needs a full-catalog fetch with
//! local filtering, sorting, and slicing (**composite mode**);
//! [`resolve_page`] executes the plan and produces one normalized page with
//! an accurate total.

use adboard_core::filter::{BrandFilter, FilterState, SortOrder};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::types::{CatalogItem, CatalogPage};

/// Items per page used by the views when no override is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// A native remote endpoint able to answer a single-dimension query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleEndpoint {
    /// Plain paged listing, no filter at all.
    Listing,
    /// Category-scoped listing for one slug.
    Category(String),
    /// Free-text search for one term.
    Search(String),
}

/// The composer's decision for a given [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// Delegate to one native endpoint and trust its paging and total.
    Simple(SimpleEndpoint),
    /// Fetch the whole catalog and filter/sort/slice locally.
    Composite,
}

/// Decides between simple and composite mode. Pure.
///
/// Composite mode is required when the remote source cannot express the
/// request natively: a sort order is set, a brand filter is set, the
/// in-stock-only flag is set, or search text and a category are combined.
/// Otherwise at most one dimension is active and its endpoint is chosen
/// directly (category outranks search, matching the remote URL scheme).
#[must_use]
pub fn query_plan(filter: &FilterState) -> QueryPlan {
    let has_search = !filter.search().is_empty();
    let category = filter.category().slug();

    let needs_composite = filter.sort() != SortOrder::Default
        || matches!(filter.brand(), BrandFilter::Only(_))
        || filter.only_in_stock()
        || (has_search && category.is_some());

    if needs_composite {
        return QueryPlan::Composite;
    }

    match (category, has_search) {
        (Some(slug), _) => QueryPlan::Simple(SimpleEndpoint::Category(slug.to_owned())),
        (None, true) => QueryPlan::Simple(SimpleEndpoint::Search(filter.search().to_owned())),
        (None, false) => QueryPlan::Simple(SimpleEndpoint::Listing),
    }
}

/// Resolves one page of results for `filter`.
///
/// Simple mode passes `limit`/`skip` through to the matching endpoint and
/// reports the remote `total` verbatim. Composite mode fetches the whole
/// catalog once, filters in a fixed order (brand, category, stock, text),
/// stable-sorts by price when requested, slices the page, and reports the
/// filtered length as `total`. An empty filtered set is a normal result,
/// not an error.
///
/// # Errors
///
/// - [`CatalogError::Http`] when the remote source is unreachable or returns
///   a non-2xx status.
/// - [`CatalogError::Deserialize`] when a response body does not match the
///   expected shape.
pub async fn resolve_page(
    client: &CatalogClient,
    filter: &FilterState,
    page_size: u32,
) -> Result<CatalogPage, CatalogError> {
    let skip = u64::from(filter.page() - 1) * u64::from(page_size);

    match query_plan(filter) {
        QueryPlan::Simple(endpoint) => {
            let envelope = match endpoint {
                SimpleEndpoint::Listing => client.fetch_page(page_size, skip).await?,
                SimpleEndpoint::Category(slug) => {
                    client.fetch_by_category(&slug, page_size, skip).await?
                }
                SimpleEndpoint::Search(query) => {
                    client.fetch_search(&query, page_size, skip).await?
                }
            };
            Ok(CatalogPage {
                items: envelope.products,
                total: envelope.total,
                page_size,
            })
        }
        QueryPlan::Composite => {
            let envelope = client.fetch_all().await?;
            let mut filtered = apply_filters(envelope.products, filter);
            sort_by_price(&mut filtered, filter.sort());
            let total = filtered.len() as u64;
            let items = slice_page(filtered, filter.page(), page_size);
            Ok(CatalogPage {
                items,
                total,
                page_size,
            })
        }
    }
}

/// Applies the composite-mode filters in their fixed order:
/// brand equality, category equality, in-stock, then case-insensitive
/// substring search over title or description.
fn apply_filters(items: Vec<CatalogItem>, filter: &FilterState) -> Vec<CatalogItem> {
    let needle = filter.search().to_lowercase();
    items
        .into_iter()
        .filter(|item| match filter.brand() {
            BrandFilter::Any => true,
            BrandFilter::Only(brand) => item.brand.as_deref() == Some(brand.as_str()),
        })
        .filter(|item| match filter.category().slug() {
            None => true,
            Some(slug) => item.category == slug,
        })
        .filter(|item| !filter.only_in_stock() || item.is_in_stock())
        .filter(|item| needle.is_empty() || item.matches_text(&needle))
        .collect()
}

/// Stable sort by price. Ties keep the remote catalog order, which makes
/// pagination deterministic across repeated requests for the same state.
fn sort_by_price(items: &mut [CatalogItem], sort: SortOrder) {
    match sort {
        SortOrder::Default => {}
        SortOrder::Lowest => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::Highest => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
}

/// Slices `[(page-1)*page_size, page*page_size)` out of the filtered
/// sequence. A page past the end yields an empty vector.
fn slice_page(items: Vec<CatalogItem>, page: u32, page_size: u32) -> Vec<CatalogItem> {
    let skip = (page as usize - 1) * page_size as usize;
    items
        .into_iter()
        .skip(skip)
        .take(page_size as usize)
        .collect()
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;

//! User-selected query state for the catalog views.
//!
//! [`FilterState`] carries every parameter that governs which items are shown
//! and in what order: free-text search, category, brand, the in-stock-only
//! flag, the price sort, and the current page. The page number is view-local
//! state; every other field round-trips through shareable URL query
//! parameters (`q`, `category`, `brand`, `inStock`, `sort`), where an absent
//! key means "all" / "unset" / default sort.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters percent-encoded in query parameter values. Space is encoded as
/// `%20` (never `+`), so the decoder's `+`-to-space mapping only affects
/// input produced elsewhere.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

/// Price ordering for the catalog listing.
///
/// `Lowest`/`Highest` serialize to the `sort` query key; `Default` keeps the
/// remote source's native order and is represented by key absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Default,
    Lowest,
    Highest,
}

impl SortOrder {
    /// Parses a `sort` query value. Unknown values fall back to `Default`.
    #[must_use]
    pub fn parse_param(value: &str) -> Self {
        match value {
            "lowest" => SortOrder::Lowest,
            "highest" => SortOrder::Highest,
            _ => SortOrder::Default,
        }
    }

    /// The query-parameter value for this order, or `None` for `Default`.
    #[must_use]
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortOrder::Default => None,
            SortOrder::Lowest => Some("lowest"),
            SortOrder::Highest => Some("highest"),
        }
    }
}

/// Category dimension: either no restriction or one category slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// The selected slug, or `None` when all categories match.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(slug) => Some(slug),
        }
    }
}

/// Brand dimension: either no restriction or one exact brand name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandFilter {
    #[default]
    Any,
    Only(String),
}

impl BrandFilter {
    /// The selected brand, or `None` when any brand matches.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            BrandFilter::Any => None,
            BrandFilter::Only(name) => Some(name),
        }
    }
}

/// The full set of user-selected query parameters.
///
/// Fields are private to protect the page invariant: `page >= 1`, and any
/// change to a non-page field resets `page` to 1 so the next fetch starts
/// from the first page of the new result set.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    search: String,
    category: CategoryFilter,
    brand: BrandFilter,
    only_in_stock: bool,
    sort: SortOrder,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            brand: BrandFilter::Any,
            only_in_stock: false,
            sort: SortOrder::Default,
            page: 1,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    #[must_use]
    pub fn brand(&self) -> &BrandFilter {
        &self.brand
    }

    #[must_use]
    pub fn only_in_stock(&self) -> bool {
        self.only_in_stock
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Sets the free-text search. A changed value resets the page to 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.search != search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Sets the category filter. A changed value resets the page to 1.
    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.category != category {
            self.category = category;
            self.page = 1;
        }
    }

    /// Sets the brand filter. A changed value resets the page to 1.
    pub fn set_brand(&mut self, brand: BrandFilter) {
        if self.brand != brand {
            self.brand = brand;
            self.page = 1;
        }
    }

    /// Sets the in-stock-only flag. A changed value resets the page to 1.
    pub fn set_only_in_stock(&mut self, only_in_stock: bool) {
        if self.only_in_stock != only_in_stock {
            self.only_in_stock = only_in_stock;
            self.page = 1;
        }
    }

    /// Sets the price sort. A changed value resets the page to 1.
    pub fn set_sort(&mut self, sort: SortOrder) {
        if self.sort != sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    /// Cycles the price sort the way the sort button does: default and
    /// highest both switch to lowest, lowest switches to highest.
    pub fn toggle_sort(&mut self) {
        let next = match self.sort {
            SortOrder::Default | SortOrder::Highest => SortOrder::Lowest,
            SortOrder::Lowest => SortOrder::Highest,
        };
        self.set_sort(next);
    }

    /// Moves to `page`. Values below 1 are clamped to 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Returns `true` when every non-page field matches `other`.
    ///
    /// This is the identity used to decide whether an accumulated list must
    /// be reset: two states that differ only in `page` describe the same
    /// result set.
    #[must_use]
    pub fn same_query(&self, other: &FilterState) -> bool {
        self.search == other.search
            && self.category == other.category
            && self.brand == other.brand
            && self.only_in_stock == other.only_in_stock
            && self.sort == other.sort
    }

    /// Serializes the non-page fields to a URL query string.
    ///
    /// Default values are represented by key absence, so an all-default state
    /// serializes to the empty string. Keys appear in a fixed order (`q`,
    /// `category`, `brand`, `inStock`, `sort`) for stable, shareable URLs.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("q", &self.search));
        }
        if let Some(slug) = self.category.slug() {
            pairs.push(("category", slug));
        }
        if let Some(name) = self.brand.name() {
            pairs.push(("brand", name));
        }
        if self.only_in_stock {
            pairs.push(("inStock", "true"));
        }
        if let Some(sort) = self.sort.as_param() {
            pairs.push(("sort", sort));
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Builds a state from decoded query pairs. Unknown keys are ignored;
    /// absent keys leave their field at the default. The resulting page is
    /// always 1.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut state = FilterState::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "q" => state.search = value,
                "category" => {
                    if !value.is_empty() && value != "all" {
                        state.category = CategoryFilter::Only(value);
                    }
                }
                "brand" => {
                    if !value.is_empty() && value != "all" {
                        state.brand = BrandFilter::Only(value);
                    }
                }
                "inStock" => state.only_in_stock = value == "true",
                "sort" => state.sort = SortOrder::parse_param(&value),
                _ => {}
            }
        }
        state
    }

    /// Parses a raw query string (with or without a leading `?`),
    /// percent-decoding each value.
    #[must_use]
    pub fn parse_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query.split('&').filter(|s| !s.is_empty()).map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        });
        Self::from_query_pairs(pairs)
    }
}

/// Percent-decodes one query component, mapping `+` to space first.
fn decode_component(raw: &str) -> String {
    let plus_mapped = raw.replace('+', " ");
    percent_decode_str(&plus_mapped)
        .decode_utf8_lossy()
        .into_owned()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;

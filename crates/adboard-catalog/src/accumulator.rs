//! Incremental page accumulator for the scroll-triggered list view.
//!
//! Successive pages for one stable query are appended into a single growing
//! list. The accumulator is single-threaded state; correctness against
//! overlapping fetches comes from two guards rather than locking:
//!
//! - every fetch carries a [`FetchTicket`] stamped with a generation counter
//!   taken when the fetch was issued — a result whose generation no longer
//!   matches belongs to a stale query and is discarded silently;
//! - an append is accepted only for the exact page number the accumulator
//!   expects next, so duplicated or out-of-order results become no-ops.

use adboard_core::filter::FilterState;

use crate::types::{CatalogItem, CatalogPage};

/// Tag handed out by [`PageAccumulator::begin_fetch`] and required to apply
/// the fetch result. Copyable so it can travel through an async fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
}

impl FetchTicket {
    /// Page number this ticket authorizes a fetch for.
    #[must_use]
    pub fn page(self) -> u32 {
        self.page
    }
}

/// Accumulates fetched pages into one ordered list for the current query.
#[derive(Debug)]
pub struct PageAccumulator {
    filter: FilterState,
    items: Vec<CatalogItem>,
    /// Next page number an append will be accepted for. Starts at 1.
    next_page: u32,
    /// Known page count; `None` until the first page arrives.
    total_pages: Option<u32>,
    total: u64,
    /// Bumped on every query change; stale tickets carry an older value.
    generation: u64,
    in_flight: bool,
}

impl PageAccumulator {
    #[must_use]
    pub fn new(filter: FilterState) -> Self {
        let mut filter = filter;
        filter.set_page(1);
        Self {
            filter,
            items: Vec::new(),
            next_page: 1,
            total_pages: None,
            total: 0,
            generation: 0,
            in_flight: false,
        }
    }

    /// The accumulated items, in page order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// The query this list was accumulated for (page fixed at the next
    /// expected page).
    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Total matching items reported by the last accepted page.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `true` once every page of the current query has been appended.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_pages
            .is_some_and(|total_pages| self.next_page > total_pages)
    }

    /// Applies a query change. If any non-page field differs from the current
    /// query, the accumulated list is cleared, the expected page resets to 1,
    /// and the generation is bumped so in-flight results for the old query
    /// are discarded on arrival. A page-only or no-op change keeps the list.
    pub fn on_filter_changed(&mut self, new_filter: &FilterState) {
        if self.filter.same_query(new_filter) {
            return;
        }
        let mut filter = new_filter.clone();
        filter.set_page(1);
        self.filter = filter;
        self.items.clear();
        self.next_page = 1;
        self.total_pages = None;
        self.total = 0;
        self.generation += 1;
        self.in_flight = false;
        tracing::debug!(generation = self.generation, "query changed, list reset");
    }

    /// Arms the next fetch, or returns `None` when one is already pending or
    /// the list is complete. Repeated trigger signals while a fetch is in
    /// flight therefore coalesce into the single pending request.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight || self.is_complete() {
            return None;
        }
        self.in_flight = true;
        Some(FetchTicket {
            generation: self.generation,
            page: self.next_page,
        })
    }

    /// The filter to issue the fetch for `ticket` with: the current query at
    /// the ticket's page.
    #[must_use]
    pub fn request_filter(&self, ticket: FetchTicket) -> FilterState {
        let mut filter = self.filter.clone();
        filter.set_page(ticket.page);
        filter
    }

    /// Applies a fetched page.
    ///
    /// A ticket from an older generation is a stale result for a previous
    /// query: dropped with a debug log, never surfaced. A current-generation
    /// ticket for any page other than the expected one signals duplicated or
    /// out-of-order delivery: logged as a consistency warning and ignored.
    pub fn on_page_fetched(&mut self, ticket: FetchTicket, page: CatalogPage) {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale fetch result"
            );
            return;
        }
        self.in_flight = false;
        if ticket.page != self.next_page {
            tracing::warn!(
                ticket_page = ticket.page,
                expected_page = self.next_page,
                "ignoring out-of-order page result"
            );
            return;
        }
        self.total = page.total;
        self.total_pages = Some(page.total_pages());
        self.items.extend(page.items);
        self.next_page += 1;
        self.filter.set_page(self.next_page);
    }

    /// Clears the pending flag after a failed fetch so the trigger can
    /// re-arm. Stale-generation failures are ignored.
    pub fn on_fetch_failed(&mut self, ticket: FetchTicket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }
}

#[cfg(test)]
#[path = "accumulator_test.rs"]
mod tests;

pub mod accumulator;
pub mod client;
pub mod composer;
pub mod error;
mod retry;
pub mod types;

pub use accumulator::{FetchTicket, PageAccumulator};
pub use client::CatalogClient;
pub use composer::{query_plan, resolve_page, QueryPlan, SimpleEndpoint};
pub use error::CatalogError;
pub use types::{CatalogItem, CatalogPage, CatalogPageEnvelope};

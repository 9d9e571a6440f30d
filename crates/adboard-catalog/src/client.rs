//! HTTP client for the remote catalog source.
//!
//! Wraps `reqwest` with typed response deserialization and a bounded retry
//! policy for transient failures. The remote source only offers
//! single-dimension endpoints (plain listing, one category, one search term);
//! combining dimensions is the query composer's job, built on
//! [`CatalogClient::fetch_all`].

use std::time::Duration;

use reqwest::{Client, Url};

use adboard_core::AppConfig;

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;
use crate::types::{CatalogItem, CatalogPageEnvelope};

const DEFAULT_BASE_URL: &str = "https://dummyjson.com/";

/// Client for the remote catalog REST API.
///
/// Use [`CatalogClient::from_config`] in the binary, or
/// [`CatalogClient::with_base_url`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    /// Additional attempts after the first failure for retriable errors.
    max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client pointed at the production catalog source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CatalogError> {
        Self::with_base_url(
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::with_base_url(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
            &config.catalog_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: the stored base always ends with exactly one slash so
        // path segments append under the root instead of replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches one page of the plain (unfiltered) listing.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or non-2xx status.
    /// - [`CatalogError::Deserialize`] if the envelope does not match.
    pub async fn fetch_page(
        &self,
        limit: u32,
        skip: u64,
    ) -> Result<CatalogPageEnvelope, CatalogError> {
        let url = self.endpoint_url(
            &["products"],
            &[("limit", &limit.to_string()), ("skip", &skip.to_string())],
        );
        self.get_json(&url, "product listing").await
    }

    /// Fetches one page of a category-scoped listing.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_page`].
    pub async fn fetch_by_category(
        &self,
        slug: &str,
        limit: u32,
        skip: u64,
    ) -> Result<CatalogPageEnvelope, CatalogError> {
        let url = self.endpoint_url(
            &["products", "category", slug],
            &[("limit", &limit.to_string()), ("skip", &skip.to_string())],
        );
        self.get_json(&url, &format!("category listing ({slug})")).await
    }

    /// Fetches one page of free-text search results.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_page`].
    pub async fn fetch_search(
        &self,
        query: &str,
        limit: u32,
        skip: u64,
    ) -> Result<CatalogPageEnvelope, CatalogError> {
        let url = self.endpoint_url(
            &["products", "search"],
            &[
                ("q", query),
                ("limit", &limit.to_string()),
                ("skip", &skip.to_string()),
            ],
        );
        self.get_json(&url, &format!("search ({query})")).await
    }

    /// Fetches the entire catalog in one unpaged request, using the remote
    /// source's `limit=0` sentinel.
    ///
    /// This is the backbone of composite-mode queries and brand discovery.
    /// It assumes the remote source can return all items in one response,
    /// which holds for the current collaborator but would not survive a
    /// much larger catalog.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_page`].
    pub async fn fetch_all(&self) -> Result<CatalogPageEnvelope, CatalogError> {
        let url = self.endpoint_url(&["products"], &[("limit", "0")]);
        self.get_json(&url, "full catalog").await
    }

    /// Fetches a single item by id.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_page`]; an unknown id
    /// surfaces as [`CatalogError::Http`] with a 404 status.
    pub async fn get_item(&self, id: i64) -> Result<CatalogItem, CatalogError> {
        let url = self.endpoint_url(&["products", &id.to_string()], &[]);
        self.get_json(&url, &format!("item {id}")).await
    }

    /// Fetches the list of category slugs.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_page`].
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint_url(&["products", "category-list"], &[]);
        self.get_json(&url, "category list").await
    }

    /// Derives the brand list from the full catalog: unique non-empty brands,
    /// sorted alphabetically. The remote source has no brand endpoint.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_all`].
    pub async fn brands(&self) -> Result<Vec<String>, CatalogError> {
        let envelope = self.fetch_all().await?;
        let mut brands: Vec<String> = envelope
            .products
            .into_iter()
            .filter_map(|item| item.brand)
            .filter(|brand| !brand.is_empty())
            .collect();
        brands.sort();
        brands.dedup();
        Ok(brands)
    }

    /// Builds a request URL from path segments and query parameters, with
    /// everything percent-encoded by `reqwest::Url`.
    fn endpoint_url(&self, segments: &[&str], params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request with retry, asserts a 2xx status, and parses the
    /// body into `T`.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url).send().await?;
                let response = response.error_for_status()?;
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

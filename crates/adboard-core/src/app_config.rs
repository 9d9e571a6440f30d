use std::path::PathBuf;

/// Runtime configuration for the catalog client and credential store.
///
/// Every field has a default, so the binary runs with no environment set up;
/// see [`crate::config::load_app_config`] for the env var names.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote catalog source.
    pub catalog_base_url: String,
    /// Per-request timeout for catalog fetches, in seconds.
    pub request_timeout_secs: u64,
    /// `User-Agent` header sent with every catalog request.
    pub user_agent: String,
    /// Items per page for the paged listing views.
    pub page_size: u32,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    /// Base delay in milliseconds for exponential retry backoff.
    pub retry_backoff_base_ms: u64,
    /// Path of the persisted credential blob.
    pub credentials_path: PathBuf,
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
}

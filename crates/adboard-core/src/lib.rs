pub mod app_config;
pub mod config;
pub mod display;
pub mod filter;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use display::format_category_name;
pub use filter::{BrandFilter, CategoryFilter, FilterState, SortOrder};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

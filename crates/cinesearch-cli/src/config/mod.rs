//! Application configuration module.
//!
//! Reads the optional TOML config file holding OMDb connection settings and
//! resolves the API key from flags, environment and config.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, DEFAULT_API_KEY, resolve_api_key};
pub use paths::{log_file_path, resolve_config_path};

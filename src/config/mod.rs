//! Configuration module for lolreg.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lolreg::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .data_dir("data")
//!     .extra_segment("Policies")
//!     .build();
//!
//! use lolreg::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.lolreg.yaml` file in your project root or `~/.config/lolreg/`:
//!
//! ```yaml
//! data:
//!   dir: ./data
//! registry:
//!   extra_segments: [Policies, Uninstall]
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{default_hive_order, DEFAULT_DATA_DIR, DEFAULT_HIVE_ORDER};
pub use types::{
    AppConfig, AppConfigBuilder, DataConfig, OutputConfig, RegistryConfig, TreeConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.lolreg.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

//! Pipeline orchestration for catalog operations.
//!
//! This module provides shared orchestration logic for load → derive → report
//! workflows, reducing duplication across CLI command handlers.

mod load;
mod output;
mod report_stage;

pub use load::{load_catalog, load_catalog_from, LoadedCatalog};
pub use output::{auto_detect_format, write_output, OutputTarget};
pub use report_stage::output_report;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse the record files
    #[error("Loading records from {path} failed: {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: crate::error::LolregError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for scripting
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// A search matched nothing, or an id was not found
    pub const NO_MATCHES: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}

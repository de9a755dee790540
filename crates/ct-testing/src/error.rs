//! Error types for ct-testing

use ct_core::CoreError;
use ct_tools::ToolError;
use thiserror::Error;

/// Result type for ct-testing operations
pub type Result<T> = std::result::Result<T, TestingError>;

/// Errors raised by the testing pipeline
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestingError {
    /// External tool failed
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Chart or configuration problem
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Neither a maintainer list nor the deprecated field is present
    #[error("chart '{chart}' has no maintainers; add a 'maintainers' list to Chart.yaml")]
    MissingMaintainers { chart: String },

    /// Version was not bumped against the target branch
    #[error("chart version not ok, needs a version bump ({old} -> {new})")]
    VersionNotIncremented { old: String, new: String },

    /// Schema validation is enabled but no schema was found
    #[error("no chart schema configured; set chart-yaml-schema or skip schema validation")]
    MissingSchema,

    /// One or more charts failed
    #[error("{failed} of {total} chart(s) failed")]
    ChartsFailed { failed: usize, total: usize },
}

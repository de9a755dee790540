//! ct Core - Core types for chart-testing
//!
//! This crate provides the foundational types used throughout ct:
//! - `ChartYaml`: The chart descriptor (`Chart.yaml`) with maintainer handling
//! - `ChartClassifier`: Chart directory detection and descriptor loading
//! - `Configuration`: Immutable per-run settings
//! - `JsonSchema`: Native JSON Schema validation of YAML documents

pub mod chart;
pub mod config;
pub mod error;
pub mod schema;

pub use chart::{
    CHART_YAML, ChartClassifier, ChartUtils, ChartYaml, Deprecated, Maintainer, VALUES_YAML,
    chart_name, find_ci_values_files,
};
pub use config::{ChartRepo, Configuration};
pub use error::{CoreError, Result};
pub use schema::JsonSchema;

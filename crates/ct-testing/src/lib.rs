//! ct Testing - the chart testing pipeline
//!
//! Given a commit range and the configured chart directories, this crate
//! works out which charts need attention and runs them through:
//! - **Discovery**: changed charts from the git diff, or every chart
//! - **Lint**: maintainers, version bump, yamllint, schema, helm lint
//! - **Install**: dependency build, install, chart tests, readiness, cleanup
//!
//! A failing chart never stops the others; the run fails if any chart failed.

pub mod error;
mod install;
mod lint;
mod maintainers;
mod resolve;
pub mod result;
pub mod testing;
mod version;

#[cfg(test)]
mod test_support;

pub use error::{Result, TestingError};
pub use install::{InstallTarget, sanitize_name};
pub use result::{LintResult, Step, StepFailure, TestReport, TestResult};
pub use testing::{Mode, Testing, TestingBuilder};

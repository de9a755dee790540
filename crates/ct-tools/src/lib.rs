//! External tools used by chart-testing
//!
//! Every tool sits behind a trait so the testing pipeline can be driven by
//! deterministic fakes:
//! - **Git**: merge base, changed files, files on the target branch
//! - **Helm**: repositories, dependencies, lint, install, test, uninstall
//! - **Kubectl**: deployment readiness and namespace cleanup
//! - **Linters**: yamllint and chart schema validation
//! - **DirectoryLister**: chart root listing

pub mod error;
pub mod exec;
pub mod git;
pub mod helm;
pub mod kubectl;
pub mod linter;
pub mod listing;
pub mod mock;

pub use error::{Result, ToolError};
pub use exec::ProcessExecutor;
pub use git::{Git, GitCli};
pub use helm::{Helm, HelmCli};
pub use kubectl::{Kubectl, KubectlCli};
pub use linter::{ChartSchemaValidator, SchemaValidator, YamlLintValidator, Yamllint};
pub use listing::{DirectoryLister, FsDirectoryLister};
pub use mock::{CallLog, LinterCounts, MockDirectoryLister, MockGit, MockHelm, MockKubectl, MockLinter};

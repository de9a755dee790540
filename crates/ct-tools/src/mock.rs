//! Mock tools for testing
//!
//! In-memory implementations of every tool trait. They record each call so
//! tests can assert exactly which commands would have run, and can be told
//! to fail specific operations.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{Result, ToolError};
use crate::git::Git;
use crate::helm::Helm;
use crate::kubectl::Kubectl;
use crate::linter::{SchemaValidator, YamlLintValidator};
use crate::listing::DirectoryLister;

fn failure(command: String) -> ToolError {
    ToolError::CommandFailed {
        command,
        status: "exit status: 1".to_string(),
        stderr: "mock failure".to_string(),
    }
}

fn values_suffix(values_file: Option<&Path>) -> String {
    values_file
        .map(|v| format!(" --values {}", v.display()))
        .unwrap_or_default()
}

/// Shared, append-only call log
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<RwLock<Vec<String>>>);

impl CallLog {
    fn record(&self, call: String) {
        self.0.write().unwrap().push(call);
    }

    /// All recorded calls in order
    pub fn calls(&self) -> Vec<String> {
        self.0.read().unwrap().clone()
    }

    /// Number of calls starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.0
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

/// In-memory [`Git`]
#[derive(Debug, Clone, Default)]
pub struct MockGit {
    changed_files: Vec<String>,
    branch_files: HashMap<String, String>,
    fail_diff: bool,
    log: CallLog,
}

impl MockGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files reported as changed
    pub fn with_changed_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// A file that exists on the target branch with the given content
    pub fn with_branch_file(mut self, file: impl Into<String>, content: impl Into<String>) -> Self {
        self.branch_files.insert(file.into(), content.into());
        self
    }

    /// Make the diff fail
    pub fn failing_diff(mut self) -> Self {
        self.fail_diff = true;
        self
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

impl Git for MockGit {
    fn merge_base(&self, commit1: &str, commit2: &str) -> Result<String> {
        self.log.record(format!("merge-base {} {}", commit1, commit2));
        Ok("abc123".to_string())
    }

    fn list_changed_files_in_dirs(&self, commit: &str, dirs: &[String]) -> Result<Vec<String>> {
        let call = format!("diff {} -- {}", commit, dirs.join(" "));
        self.log.record(call.clone());
        if self.fail_diff {
            return Err(failure(format!("git {}", call)));
        }
        Ok(self.changed_files.clone())
    }

    fn file_exists_on_branch(&self, file: &str, remote: &str, branch: &str) -> bool {
        self.log
            .record(format!("cat-file {}/{}:{}", remote, branch, file));
        self.branch_files.contains_key(file)
    }

    fn show(&self, file: &str, remote: &str, branch: &str) -> Result<String> {
        let call = format!("show {}/{}:{}", remote, branch, file);
        self.log.record(call.clone());
        self.branch_files
            .get(file)
            .cloned()
            .ok_or_else(|| failure(format!("git {}", call)))
    }
}

/// In-memory [`Helm`]
///
/// Calls are recorded as `<operation> <args...>`, e.g.
/// `install <release> <chart> --namespace <ns>`.
#[derive(Debug, Clone, Default)]
pub struct MockHelm {
    failing: HashSet<String>,
    log: CallLog,
}

impl MockHelm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call of an operation (`repo`, `dependency`, `lint`,
    /// `install`, `test`, `uninstall`)
    pub fn failing(mut self, operation: &str) -> Self {
        self.failing.insert(operation.to_string());
        self
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    fn run(&self, operation: &str, call: String) -> Result<()> {
        self.log.record(call.clone());
        if self.failing.contains(operation) {
            return Err(failure(format!("helm {}", call)));
        }
        Ok(())
    }
}

impl Helm for MockHelm {
    fn add_repo(&self, name: &str, url: &str) -> Result<()> {
        self.run("repo", format!("repo add {} {}", name, url))
    }

    fn build_dependencies(&self, chart: &str) -> Result<()> {
        self.run("dependency", format!("dependency build {}", chart))
    }

    fn lint_with_values(&self, chart: &str, values_file: Option<&Path>) -> Result<()> {
        self.run(
            "lint",
            format!("lint {}{}", chart, values_suffix(values_file)),
        )
    }

    fn install_with_values(
        &self,
        chart: &str,
        values_file: Option<&Path>,
        namespace: &str,
        release: &str,
    ) -> Result<()> {
        self.run(
            "install",
            format!(
                "install {} {} --namespace {}{}",
                release,
                chart,
                namespace,
                values_suffix(values_file)
            ),
        )
    }

    fn test(&self, namespace: &str, release: &str) -> Result<()> {
        self.run("test", format!("test {} --namespace {}", release, namespace))
    }

    fn delete_release(&self, namespace: &str, release: &str) -> Result<()> {
        self.run(
            "uninstall",
            format!("uninstall {} --namespace {}", release, namespace),
        )
    }
}

/// In-memory [`Kubectl`]
#[derive(Debug, Clone, Default)]
pub struct MockKubectl {
    fail_wait: bool,
    log: CallLog,
}

impl MockKubectl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make deployment readiness checks fail
    pub fn failing_wait(mut self) -> Self {
        self.fail_wait = true;
        self
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

impl Kubectl for MockKubectl {
    fn wait_for_deployments(&self, namespace: &str, selector: Option<&str>) -> Result<()> {
        let call = match selector {
            Some(selector) => format!("wait {} --selector {}", namespace, selector),
            None => format!("wait {}", namespace),
        };
        self.log.record(call.clone());
        if self.fail_wait {
            return Err(failure(format!("kubectl {}", call)));
        }
        Ok(())
    }

    fn delete_namespace(&self, namespace: &str) -> Result<()> {
        self.log.record(format!("delete namespace {}", namespace));
        Ok(())
    }
}

/// Counts of validator invocations for assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinterCounts {
    pub yaml_lint: usize,
    pub schema: usize,
}

/// In-memory [`YamlLintValidator`] and [`SchemaValidator`]
#[derive(Debug, Clone, Default)]
pub struct MockLinter {
    fail_yaml_lint: bool,
    fail_schema: bool,
    counts: Arc<RwLock<LinterCounts>>,
    files: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockLinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every yamllint call fail
    pub fn failing_yaml_lint(mut self) -> Self {
        self.fail_yaml_lint = true;
        self
    }

    /// Make every schema validation fail
    pub fn failing_schema(mut self) -> Self {
        self.fail_schema = true;
        self
    }

    /// Get invocation counts for assertions
    pub fn counts(&self) -> LinterCounts {
        self.counts.read().unwrap().clone()
    }

    /// Files passed to either validator, in call order
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.read().unwrap().clone()
    }
}

impl YamlLintValidator for MockLinter {
    fn validate(&self, file: &Path, _config: Option<&Path>) -> Result<()> {
        self.counts.write().unwrap().yaml_lint += 1;
        self.files.write().unwrap().push(file.to_path_buf());
        if self.fail_yaml_lint {
            return Err(failure(format!("yamllint {}", file.display())));
        }
        Ok(())
    }
}

impl SchemaValidator for MockLinter {
    fn validate(&self, file: &Path, schema: &Path) -> Result<()> {
        self.counts.write().unwrap().schema += 1;
        self.files.write().unwrap().push(file.to_path_buf());
        if self.fail_schema {
            return Err(failure(format!(
                "yamale --schema {} {}",
                schema.display(),
                file.display()
            )));
        }
        Ok(())
    }
}

/// In-memory [`DirectoryLister`]
///
/// Unknown parents fail like a missing directory would.
#[derive(Debug, Clone, Default)]
pub struct MockDirectoryLister {
    children: HashMap<String, Vec<String>>,
}

impl MockDirectoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the child directories (as `parent/child`) of a parent
    pub fn with_dir<I, S>(mut self, parent: &str, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children.insert(
            parent.to_string(),
            children.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl DirectoryLister for MockDirectoryLister {
    fn list_child_dirs(&self, parent: &str, test: &dyn Fn(&str) -> bool) -> Result<Vec<String>> {
        let children = self.children.get(parent).ok_or_else(|| {
            ToolError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("directory '{}' not found", parent),
            ))
        })?;
        Ok(children.iter().filter(|d| test(d)).cloned().collect())
    }
}

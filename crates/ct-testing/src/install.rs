//! Chart installation and testing

use ct_core::chart_name;
use rand::Rng;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::result::{Step, StepFailure, TestResult};
use crate::testing::Testing;

/// Helm release names are limited to 53 characters
const MAX_RELEASE_NAME: usize = 53;

/// Kubernetes namespace names are limited to 63 characters
const MAX_NAMESPACE_NAME: usize = 63;

static LEADING_NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[^a-zA-Z0-9]+").expect("valid regex"));

/// Where one install of a chart goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub namespace: String,
    pub release: String,
    /// Label selector for the release's resources in a shared namespace
    pub selector: Option<String>,
    /// The namespace was generated for this install and is deleted afterwards
    pub owns_namespace: bool,
}

impl Testing {
    /// Install and test one chart
    ///
    /// Dependencies are built once. Then the chart is installed, tested and
    /// awaited once per values file (or once without values), each time in a
    /// fresh release that is removed afterwards, even on failure. The first
    /// failure ends the chart.
    pub fn install_chart(&self, chart: &str, values_files: &[PathBuf]) -> TestResult {
        tracing::info!("Installing chart '{}'...", chart);
        let mut result = TestResult::new(chart);

        if let Err(e) = self.helm.build_dependencies(chart) {
            result.record(Step::Dependencies, e);
            return result;
        }

        let runs: Vec<Option<&Path>> = if values_files.is_empty() {
            vec![None]
        } else {
            values_files.iter().map(|v| Some(v.as_path())).collect()
        };

        for values_file in runs {
            let target = self.install_target(chart);
            let outcome = self.install_release(chart, values_file, &target);
            self.cleanup(&target);

            if let Err(failure) = outcome {
                result.failures.push(failure);
                break;
            }
        }

        result
    }

    /// Namespace and release names for the next install of `chart`
    pub fn install_target(&self, chart: &str) -> InstallTarget {
        let build_id = self
            .config
            .build_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(random_id);
        let base = format!("{}-{}", chart_name(chart), build_id);
        let release = sanitize_name(&base, MAX_RELEASE_NAME);

        match &self.config.namespace {
            Some(namespace) => InstallTarget {
                namespace: namespace.clone(),
                selector: Some(format!("{}={}", self.config.release_label, release)),
                release,
                owns_namespace: false,
            },
            None => InstallTarget {
                namespace: sanitize_name(&base, MAX_NAMESPACE_NAME),
                release,
                selector: None,
                owns_namespace: true,
            },
        }
    }

    fn install_release(
        &self,
        chart: &str,
        values_file: Option<&Path>,
        target: &InstallTarget,
    ) -> Result<(), StepFailure> {
        self.helm
            .install_with_values(chart, values_file, &target.namespace, &target.release)
            .map_err(|e| StepFailure::new(Step::Install, e))?;

        self.helm
            .test(&target.namespace, &target.release)
            .map_err(|e| StepFailure::new(Step::ChartTest, e))?;

        self.kubectl
            .wait_for_deployments(&target.namespace, target.selector.as_deref())
            .map_err(|e| StepFailure::new(Step::Readiness, e))?;

        Ok(())
    }

    fn cleanup(&self, target: &InstallTarget) {
        if let Err(e) = self.helm.delete_release(&target.namespace, &target.release) {
            tracing::warn!("Error deleting release '{}': {}", target.release, e);
        }

        if target.owns_namespace {
            if let Err(e) = self.kubectl.delete_namespace(&target.namespace) {
                tracing::warn!("Error deleting namespace '{}': {}", target.namespace, e);
            }
        }
    }
}

/// Make `name` a valid release/namespace name of at most `max_len` characters
///
/// Excess characters are cut from the front so the unique suffix survives,
/// then leading non-alphanumeric characters are stripped.
pub fn sanitize_name(name: &str, max_len: usize) -> String {
    let excess = name.chars().count().saturating_sub(max_len);
    let truncated: String = name.chars().skip(excess).collect();
    LEADING_NON_ALPHANUMERIC
        .replace(&truncated, "")
        .into_owned()
}

fn random_id() -> String {
    rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(10)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

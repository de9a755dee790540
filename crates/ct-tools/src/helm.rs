//! Helm integration

use std::path::Path;

use crate::error::Result;
use crate::exec::ProcessExecutor;

/// Packaging tool operations
pub trait Helm {
    /// Add a chart repository
    fn add_repo(&self, name: &str, url: &str) -> Result<()>;

    /// Build the chart's dependencies from its lock file
    fn build_dependencies(&self, chart: &str) -> Result<()>;

    /// Lint a chart, optionally with a values file
    fn lint_with_values(&self, chart: &str, values_file: Option<&Path>) -> Result<()>;

    /// Install a chart and wait until its resources are ready
    fn install_with_values(
        &self,
        chart: &str,
        values_file: Option<&Path>,
        namespace: &str,
        release: &str,
    ) -> Result<()>;

    /// Run the chart tests of a release
    fn test(&self, namespace: &str, release: &str) -> Result<()>;

    /// Remove a release
    fn delete_release(&self, namespace: &str, release: &str) -> Result<()>;
}

/// [`Helm`] backed by the `helm` binary
#[derive(Debug, Clone, Default)]
pub struct HelmCli {
    exec: ProcessExecutor,
    extra_args: Vec<String>,
}

impl HelmCli {
    /// Create a helm runner; `extra_args` go to install, test and uninstall
    pub fn new(extra_args: Vec<String>) -> Self {
        Self {
            exec: ProcessExecutor,
            extra_args,
        }
    }
}

impl Helm for HelmCli {
    fn add_repo(&self, name: &str, url: &str) -> Result<()> {
        self.exec.run_process("helm", ["repo", "add", name, url])
    }

    fn build_dependencies(&self, chart: &str) -> Result<()> {
        self.exec.run_process("helm", ["dependency", "build", chart])
    }

    fn lint_with_values(&self, chart: &str, values_file: Option<&Path>) -> Result<()> {
        self.exec.run_process("helm", lint_args(chart, values_file))
    }

    fn install_with_values(
        &self,
        chart: &str,
        values_file: Option<&Path>,
        namespace: &str,
        release: &str,
    ) -> Result<()> {
        let args = install_args(chart, values_file, namespace, release, &self.extra_args);
        self.exec.run_process("helm", args)
    }

    fn test(&self, namespace: &str, release: &str) -> Result<()> {
        let mut args = vec![
            "test".to_string(),
            release.to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        self.exec.run_process("helm", args)
    }

    fn delete_release(&self, namespace: &str, release: &str) -> Result<()> {
        tracing::info!("Deleting release '{}'...", release);
        let mut args = vec![
            "uninstall".to_string(),
            release.to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        self.exec.run_process("helm", args)
    }
}

fn lint_args(chart: &str, values_file: Option<&Path>) -> Vec<String> {
    let mut args = vec!["lint".to_string(), chart.to_string()];
    if let Some(values) = values_file {
        args.push("--values".to_string());
        args.push(values.display().to_string());
    }
    args
}

fn install_args(
    chart: &str,
    values_file: Option<&Path>,
    namespace: &str,
    release: &str,
    extra_args: &[String],
) -> Vec<String> {
    let mut args = vec![
        "install".to_string(),
        release.to_string(),
        chart.to_string(),
        "--namespace".to_string(),
        namespace.to_string(),
        "--create-namespace".to_string(),
        "--wait".to_string(),
    ];
    if let Some(values) = values_file {
        args.push("--values".to_string());
        args.push(values.display().to_string());
    }
    args.extend(extra_args.iter().cloned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_args() {
        assert_eq!(lint_args("stable/nginx", None), vec!["lint", "stable/nginx"]);
        assert_eq!(
            lint_args("stable/nginx", Some(Path::new("stable/nginx/ci/a-values.yaml"))),
            vec!["lint", "stable/nginx", "--values", "stable/nginx/ci/a-values.yaml"]
        );
    }

    #[test]
    fn test_install_args() {
        let extra = vec!["--timeout".to_string(), "600s".to_string()];
        let args = install_args(
            "stable/nginx",
            Some(Path::new("ci/a-values.yaml")),
            "nginx-42",
            "nginx-42",
            &extra,
        );
        assert_eq!(
            args,
            vec![
                "install",
                "nginx-42",
                "stable/nginx",
                "--namespace",
                "nginx-42",
                "--create-namespace",
                "--wait",
                "--values",
                "ci/a-values.yaml",
                "--timeout",
                "600s",
            ]
        );
    }

    #[test]
    fn test_install_args_without_values() {
        let args = install_args("stable/nginx", None, "ns", "rel", &[]);
        assert!(!args.contains(&"--values".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--wait"));
    }
}

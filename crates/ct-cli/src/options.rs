//! Command-line flags layered over the config file
//!
//! Every flag is optional: unset flags keep the value from `ct.yaml` (or the
//! built-in default). List flags replace the configured list when given.

use clap::{ArgAction, Args};
use ct_core::Configuration;
use std::path::PathBuf;

/// Where charts live and what they are compared against
#[derive(Args, Debug, Default)]
pub struct GitOptions {
    /// Git remote used to identify changed charts
    #[arg(long, env = "CT_REMOTE")]
    pub remote: Option<String>,

    /// Branch changed charts are compared against
    #[arg(long, env = "CT_TARGET_BRANCH")]
    pub target_branch: Option<String>,

    /// Directories containing charts (comma-separated)
    #[arg(long, env = "CT_CHART_DIRS", value_delimiter = ',')]
    pub chart_dirs: Vec<String>,

    /// Chart names that are never processed (comma-separated)
    #[arg(long, env = "CT_EXCLUDED_CHARTS", value_delimiter = ',')]
    pub excluded_charts: Vec<String>,
}

impl GitOptions {
    pub fn apply(self, config: &mut Configuration) {
        if let Some(remote) = self.remote {
            config.remote = remote;
        }
        if let Some(branch) = self.target_branch {
            config.target_branch = branch;
        }
        if !self.chart_dirs.is_empty() {
            config.chart_dirs = self.chart_dirs;
        }
        if !self.excluded_charts.is_empty() {
            config.excluded_charts = self.excluded_charts.into_iter().collect();
        }
    }
}

/// Which charts to process
#[derive(Args, Debug, Default)]
pub struct ChartOptions {
    #[command(flatten)]
    pub git: GitOptions,

    /// Process all charts, not only changed ones
    #[arg(long, env = "CT_ALL")]
    pub all: bool,

    /// Charts to process, ignoring changes (comma-separated)
    #[arg(long, env = "CT_CHARTS", value_delimiter = ',')]
    pub charts: Vec<String>,
}

impl ChartOptions {
    pub fn apply(self, config: &mut Configuration) {
        self.git.apply(config);
        if self.all {
            config.all = true;
        }
        if !self.charts.is_empty() {
            config.charts = self.charts;
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct LintOptions {
    /// yamllint configuration file
    #[arg(long, env = "CT_LINT_CONF")]
    pub lint_conf: Option<PathBuf>,

    /// Chart.yaml schema (yamale .yaml or JSON Schema .json)
    #[arg(long, env = "CT_CHART_YAML_SCHEMA")]
    pub chart_yaml_schema: Option<PathBuf>,

    /// Require maintainers in Chart.yaml
    #[arg(long, env = "CT_VALIDATE_MAINTAINERS", action = ArgAction::Set)]
    pub validate_maintainers: Option<bool>,

    /// Require a chart version bump against the target branch
    #[arg(long, env = "CT_CHECK_VERSION_INCREMENT", action = ArgAction::Set)]
    pub check_version_increment: Option<bool>,

    /// Skip Chart.yaml schema validation
    #[arg(long, env = "CT_SKIP_SCHEMA_VALIDATION")]
    pub skip_schema_validation: bool,

    /// Skip yamllint
    #[arg(long, env = "CT_SKIP_YAML_LINT")]
    pub skip_yaml_lint: bool,
}

impl LintOptions {
    pub fn apply(self, config: &mut Configuration) {
        if self.lint_conf.is_some() {
            config.lint_conf = self.lint_conf;
        }
        if self.chart_yaml_schema.is_some() {
            config.chart_yaml_schema = self.chart_yaml_schema;
        }
        if let Some(validate) = self.validate_maintainers {
            config.validate_maintainers = validate;
        }
        if let Some(check) = self.check_version_increment {
            config.check_version_increment = check;
        }
        if self.skip_schema_validation {
            config.skip_schema_validation = true;
        }
        if self.skip_yaml_lint {
            config.skip_yaml_lint = true;
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct InstallOptions {
    /// CI build id, used in release and namespace names
    #[arg(long, env = "CT_BUILD_ID")]
    pub build_id: Option<String>,

    /// Install every release into this namespace instead of a fresh one
    #[arg(long, env = "CT_NAMESPACE")]
    pub namespace: Option<String>,

    /// Label identifying a release's resources in a shared namespace
    #[arg(long, env = "CT_RELEASE_LABEL")]
    pub release_label: Option<String>,

    /// Chart repositories to add, as name=url (comma-separated)
    #[arg(long, env = "CT_CHART_REPOS", value_delimiter = ',')]
    pub chart_repos: Vec<String>,

    /// Extra arguments for helm install (whitespace-separated)
    #[arg(long, env = "CT_HELM_EXTRA_ARGS", allow_hyphen_values = true)]
    pub helm_extra_args: Option<String>,
}

impl InstallOptions {
    pub fn apply(self, config: &mut Configuration) {
        if self.build_id.is_some() {
            config.build_id = self.build_id;
        }
        if self.namespace.is_some() {
            config.namespace = self.namespace;
        }
        if let Some(label) = self.release_label {
            config.release_label = label;
        }
        if !self.chart_repos.is_empty() {
            config.chart_repos = self.chart_repos;
        }
        if let Some(args) = self.helm_extra_args {
            config.helm_extra_args = args.split_whitespace().map(str::to_string).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        charts: ChartOptions,

        #[command(flatten)]
        lint: LintOptions,

        #[command(flatten)]
        install: InstallOptions,
    }

    fn parse(args: &[&str]) -> Configuration {
        let cli = TestCli::parse_from(std::iter::once("ct").chain(args.iter().copied()));
        let mut config = Configuration::default();
        cli.charts.apply(&mut config);
        cli.lint.apply(&mut config);
        cli.install.apply(&mut config);
        config
    }

    #[test]
    fn test_unset_flags_keep_defaults() {
        let config = parse(&[]);
        let defaults = Configuration::default();
        assert_eq!(config.remote, defaults.remote);
        assert_eq!(config.chart_dirs, defaults.chart_dirs);
        assert!(config.validate_maintainers);
        assert!(config.check_version_increment);
        assert!(config.helm_extra_args.is_empty());
    }

    #[test]
    fn test_flags_override() {
        let config = parse(&[
            "--remote",
            "upstream",
            "--target-branch",
            "main",
            "--chart-dirs",
            "stable,incubator",
            "--excluded-charts",
            "common",
            "--charts",
            "stable/foo",
            "--validate-maintainers",
            "false",
            "--skip-yaml-lint",
            "--build-id",
            "42",
            "--helm-extra-args",
            "--timeout 600s",
        ]);

        assert_eq!(config.remote, "upstream");
        assert_eq!(config.target_ref(), "upstream/main");
        assert_eq!(config.chart_dirs, vec!["stable", "incubator"]);
        assert!(config.is_excluded("common"));
        assert_eq!(config.charts, vec!["stable/foo"]);
        assert!(!config.validate_maintainers);
        assert!(config.skip_yaml_lint);
        assert!(!config.skip_schema_validation);
        assert_eq!(config.build_id.as_deref(), Some("42"));
        assert_eq!(config.helm_extra_args, vec!["--timeout", "600s"]);
    }

    #[test]
    fn test_list_flags_replace_configured_lists() {
        let mut config = Configuration {
            chart_dirs: vec!["charts".to_string()],
            charts: vec!["charts/old".to_string()],
            excluded_charts: ["common".to_string()].into(),
            chart_repos: vec!["old=https://old.example.com".to_string()],
            ..Configuration::default()
        };

        let cli = TestCli::parse_from([
            "ct",
            "--chart-dirs",
            "stable",
            "--charts",
            "stable/new",
            "--excluded-charts",
            "legacy",
            "--chart-repos",
            "new=https://new.example.com",
        ]);
        cli.charts.apply(&mut config);
        cli.install.apply(&mut config);

        assert_eq!(config.chart_dirs, vec!["stable"]);
        assert_eq!(config.charts, vec!["stable/new"]);
        assert!(config.is_excluded("legacy"));
        assert!(!config.is_excluded("common"));
        assert_eq!(config.chart_repos, vec!["new=https://new.example.com"]);
    }

    #[test]
    fn test_file_values_survive_unset_flags() {
        let mut config = Configuration {
            namespace: Some("ci".to_string()),
            skip_schema_validation: true,
            excluded_charts: ["common".to_string()].into(),
            chart_repos: vec!["stable=https://charts.example.com".to_string()],
            ..Configuration::default()
        };
        ChartOptions::default().apply(&mut config);
        LintOptions::default().apply(&mut config);
        InstallOptions::default().apply(&mut config);
        assert_eq!(config.namespace.as_deref(), Some("ci"));
        assert!(config.skip_schema_validation);
        assert!(config.is_excluded("common"));
        assert_eq!(config.chart_repos.len(), 1);
    }
}

//! Batch orchestration

use ct_core::{ChartClassifier, ChartUtils, Configuration};
use ct_tools::{
    ChartSchemaValidator, DirectoryLister, FsDirectoryLister, Git, GitCli, Helm, HelmCli,
    Kubectl, KubectlCli, SchemaValidator, YamlLintValidator, Yamllint,
};

use crate::error::Result;
use crate::result::{Step, TestReport, TestResult};

/// What to do with each selected chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Lint,
    Install,
    LintAndInstall,
}

impl Mode {
    #[inline]
    pub fn lints(self) -> bool {
        matches!(self, Mode::Lint | Mode::LintAndInstall)
    }

    #[inline]
    pub fn installs(self) -> bool {
        matches!(self, Mode::Install | Mode::LintAndInstall)
    }
}

/// The chart testing pipeline
///
/// Holds the run configuration and a handle to every external tool. Build
/// one with [`Testing::builder`]; tools that are not set explicitly use the
/// real command-line implementations.
pub struct Testing {
    pub(crate) config: Configuration,
    pub(crate) git: Box<dyn Git>,
    pub(crate) helm: Box<dyn Helm>,
    pub(crate) kubectl: Box<dyn Kubectl>,
    pub(crate) linter: Box<dyn YamlLintValidator>,
    pub(crate) schema_validator: Box<dyn SchemaValidator>,
    pub(crate) directory_lister: Box<dyn DirectoryLister>,
    pub(crate) chart_utils: Box<dyn ChartClassifier>,
}

impl Testing {
    pub fn builder(config: Configuration) -> TestingBuilder {
        TestingBuilder::new(config)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Charts to process: the explicit list, all charts, or changed charts
    pub fn compute_charts(&self) -> Result<Vec<String>> {
        if !self.config.charts.is_empty() {
            return Ok(self.config.charts.clone());
        }
        if self.config.all {
            return self.read_all_chart_directories();
        }
        self.compute_changed_chart_directories()
    }

    /// Add the configured chart repositories
    pub fn add_chart_repos(&self) -> Result<()> {
        for repo in self.config.parsed_chart_repos()? {
            tracing::info!("Adding chart repository '{}'...", repo.name);
            self.helm.add_repo(&repo.name, &repo.url)?;
        }
        Ok(())
    }

    /// Run the pipeline over the selected charts
    ///
    /// Collaborator failures while selecting charts or adding repositories
    /// abort the run. Chart failures are collected in the report.
    pub fn run(&self, mode: Mode) -> Result<TestReport> {
        let charts = self.compute_charts()?;
        if charts.is_empty() {
            tracing::info!("No chart changes detected.");
            return Ok(TestReport::default());
        }

        tracing::info!("Charts to be processed: {}", charts.join(", "));

        if mode.installs() {
            self.add_chart_repos()?;
        }

        let mut report = TestReport::default();
        for chart in &charts {
            let values_files = match self.chart_utils.ci_values_files(chart) {
                Ok(files) => files,
                Err(e) => {
                    let mut result = TestResult::new(chart.as_str());
                    result.record(Step::ValuesFiles, e);
                    report.results.push(result);
                    continue;
                }
            };

            let mut result = if mode.lints() {
                self.lint_chart(chart, &values_files)
            } else {
                TestResult::new(chart.as_str())
            };

            if mode.installs() && result.passed() {
                result.absorb(self.install_chart(chart, &values_files));
            }

            report.results.push(result);
        }

        Ok(report)
    }
}

/// Builder for [`Testing`]
pub struct TestingBuilder {
    config: Configuration,
    git: Option<Box<dyn Git>>,
    helm: Option<Box<dyn Helm>>,
    kubectl: Option<Box<dyn Kubectl>>,
    linter: Option<Box<dyn YamlLintValidator>>,
    schema_validator: Option<Box<dyn SchemaValidator>>,
    directory_lister: Option<Box<dyn DirectoryLister>>,
    chart_utils: Option<Box<dyn ChartClassifier>>,
}

impl TestingBuilder {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            git: None,
            helm: None,
            kubectl: None,
            linter: None,
            schema_validator: None,
            directory_lister: None,
            chart_utils: None,
        }
    }

    pub fn git(mut self, git: impl Git + 'static) -> Self {
        self.git = Some(Box::new(git));
        self
    }

    pub fn helm(mut self, helm: impl Helm + 'static) -> Self {
        self.helm = Some(Box::new(helm));
        self
    }

    pub fn kubectl(mut self, kubectl: impl Kubectl + 'static) -> Self {
        self.kubectl = Some(Box::new(kubectl));
        self
    }

    pub fn linter(mut self, linter: impl YamlLintValidator + 'static) -> Self {
        self.linter = Some(Box::new(linter));
        self
    }

    pub fn schema_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.schema_validator = Some(Box::new(validator));
        self
    }

    pub fn directory_lister(mut self, lister: impl DirectoryLister + 'static) -> Self {
        self.directory_lister = Some(Box::new(lister));
        self
    }

    pub fn chart_utils(mut self, chart_utils: impl ChartClassifier + 'static) -> Self {
        self.chart_utils = Some(Box::new(chart_utils));
        self
    }

    pub fn build(self) -> Testing {
        let extra_args = self.config.helm_extra_args.clone();
        Testing {
            config: self.config,
            git: self.git.unwrap_or_else(|| Box::new(GitCli::new())),
            helm: self.helm.unwrap_or_else(|| Box::new(HelmCli::new(extra_args))),
            kubectl: self.kubectl.unwrap_or_else(|| Box::new(KubectlCli::new())),
            linter: self.linter.unwrap_or_else(|| Box::new(Yamllint::new())),
            schema_validator: self
                .schema_validator
                .unwrap_or_else(|| Box::new(ChartSchemaValidator::new())),
            directory_lister: self
                .directory_lister
                .unwrap_or_else(|| Box::new(FsDirectoryLister)),
            chart_utils: self.chart_utils.unwrap_or_else(|| Box::new(ChartUtils)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, base_config, testdata};
    use ct_core::Configuration;

    #[test]
    fn test_mode_flags() {
        assert!(Mode::Lint.lints() && !Mode::Lint.installs());
        assert!(!Mode::Install.lints() && Mode::Install.installs());
        assert!(Mode::LintAndInstall.lints() && Mode::LintAndInstall.installs());
    }

    #[test]
    fn test_explicit_charts_win() {
        let config = Configuration {
            charts: vec!["stable/explicit".to_string()],
            all: true,
            ..base_config()
        };
        let fixture = Fixture::new(config);
        assert_eq!(fixture.testing.compute_charts().unwrap(), vec!["stable/explicit"]);
        assert!(fixture.git.log().calls().is_empty());
    }

    #[test]
    fn test_all_charts_skip_git() {
        let config = Configuration {
            all: true,
            ..base_config()
        };
        let fixture = Fixture::new(config);
        assert_eq!(
            fixture.testing.compute_charts().unwrap(),
            vec!["stable/foo", "incubator/bar"]
        );
        assert!(fixture.git.log().calls().is_empty());
    }

    #[test]
    fn test_no_changes_is_success() {
        let fixture = Fixture::new(base_config());
        let report = fixture.testing.run(Mode::LintAndInstall).unwrap();
        assert!(report.results.is_empty());
        assert!(report.passed());
        assert_eq!(fixture.helm.log().count("repo add"), 0);
    }

    #[test]
    fn test_run_continues_after_a_failing_chart() {
        let config = Configuration {
            charts: vec![testdata("no_maintainers"), testdata("valid_maintainers")],
            ..base_config()
        };
        let fixture = Fixture::new(config);

        let report = fixture.testing.run(Mode::Lint).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(
            report.results[0].error().map(|f| f.step),
            Some(Step::Maintainers)
        );
        assert!(report.results[1].passed());
        assert!(report.ensure_passed().is_err());
        assert_eq!(fixture.helm.log().count("lint"), 1);
    }

    #[test]
    fn test_lint_and_install_skips_install_after_lint_failure() {
        let config = Configuration {
            charts: vec![testdata("no_maintainers"), testdata("valid_maintainers")],
            chart_repos: vec!["bitnami=https://charts.bitnami.com/bitnami".to_string()],
            build_id: Some("42".to_string()),
            ..base_config()
        };
        let fixture = Fixture::new(config);

        let report = fixture.testing.run(Mode::LintAndInstall).unwrap();
        assert!(!report.passed());
        assert_eq!(
            fixture.helm.log().calls()[0],
            "repo add bitnami https://charts.bitnami.com/bitnami"
        );
        assert_eq!(fixture.helm.log().count("install"), 1);
        assert_eq!(
            fixture.helm.log().count("install valid_maintainers-42"),
            1
        );
    }

    #[test]
    fn test_bad_chart_repo_aborts_install_run() {
        let config = Configuration {
            charts: vec![testdata("valid_maintainers")],
            chart_repos: vec!["broken".to_string()],
            ..base_config()
        };
        let fixture = Fixture::new(config);
        assert!(fixture.testing.run(Mode::Install).is_err());
        assert_eq!(fixture.helm.log().count("install"), 0);
    }

    #[test]
    fn test_unreadable_ci_dir_fails_only_that_chart() {
        let config = Configuration {
            charts: vec![testdata("broken_ci"), testdata("valid_maintainers")],
            ..base_config()
        };
        let fixture = Fixture::new(config);

        let report = fixture.testing.run(Mode::Lint).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(
            report.results[0].error().map(|f| f.step),
            Some(Step::ValuesFiles)
        );
        assert!(report.results[1].passed());
        assert_eq!(fixture.helm.log().count("lint"), 1);
    }
}

//! Shared fixtures for pipeline tests

use ct_core::{ChartClassifier, ChartUtils, ChartYaml, Configuration};
use ct_tools::{MockDirectoryLister, MockGit, MockHelm, MockKubectl, MockLinter};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::testing::Testing;

/// Absolute path of a chart under `testdata/`
pub fn testdata(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Roots `stable` and `incubator`, `excluded` excluded, lint steps enabled
pub fn base_config() -> Configuration {
    Configuration {
        chart_dirs: vec!["stable".to_string(), "incubator".to_string()],
        excluded_charts: BTreeSet::from(["excluded".to_string()]),
        validate_maintainers: true,
        check_version_increment: false,
        lint_conf: Some(PathBuf::from("etc/lintconf.yaml")),
        chart_yaml_schema: Some(PathBuf::from("etc/chart_schema.yaml")),
        ..Configuration::default()
    }
}

/// Treats every directory except `stable/this-is-no-chart-dir` as a chart,
/// reads descriptors from disk, and fails to list CI values for `broken_ci`
pub struct FakeChartUtils;

impl ChartClassifier for FakeChartUtils {
    fn is_chart_dir(&self, dir: &str) -> bool {
        dir != "stable/this-is-no-chart-dir"
    }

    fn read_chart_yaml(&self, dir: &str) -> ct_core::Result<ChartYaml> {
        ChartUtils.read_chart_yaml(dir)
    }

    fn ci_values_files(&self, dir: &str) -> ct_core::Result<Vec<PathBuf>> {
        if dir.ends_with("broken_ci") {
            return Err(ct_core::CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("cannot read {}/ci", dir),
            )));
        }
        ChartUtils.ci_values_files(dir)
    }
}

/// A [`Testing`] wired to mocks, with handles to inspect them
pub struct Fixture {
    pub testing: Testing,
    pub git: MockGit,
    pub helm: MockHelm,
    pub kubectl: MockKubectl,
    pub linter: MockLinter,
}

impl Fixture {
    pub fn new(config: Configuration) -> Self {
        Self::with_tools(config, MockGit::new(), MockHelm::new(), MockLinter::new())
    }

    pub fn with_git(config: Configuration, git: MockGit) -> Self {
        Self::with_tools(config, git, MockHelm::new(), MockLinter::new())
    }

    pub fn with_helm(config: Configuration, helm: MockHelm) -> Self {
        Self::with_tools(config, MockGit::new(), helm, MockLinter::new())
    }

    pub fn with_linter(config: Configuration, linter: MockLinter) -> Self {
        Self::with_tools(config, MockGit::new(), MockHelm::new(), linter)
    }

    pub fn with_tools(
        config: Configuration,
        git: MockGit,
        helm: MockHelm,
        linter: MockLinter,
    ) -> Self {
        Self::with_kubectl(config, git, helm, linter, MockKubectl::new())
    }

    pub fn with_kubectl(
        config: Configuration,
        git: MockGit,
        helm: MockHelm,
        linter: MockLinter,
        kubectl: MockKubectl,
    ) -> Self {
        let lister = MockDirectoryLister::new()
            .with_dir("stable", ["stable/foo", "stable/excluded"])
            .with_dir("incubator", ["incubator/bar"]);

        let testing = Testing::builder(config)
            .git(git.clone())
            .helm(helm.clone())
            .kubectl(kubectl.clone())
            .linter(linter.clone())
            .schema_validator(linter.clone())
            .directory_lister(lister)
            .chart_utils(FakeChartUtils)
            .build();

        Self {
            testing,
            git,
            helm,
            kubectl,
            linter,
        }
    }
}

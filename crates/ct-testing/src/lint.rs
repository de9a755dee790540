//! Per-chart lint decisions

use ct_core::{CHART_YAML, VALUES_YAML};
use std::path::{Path, PathBuf};

use crate::error::TestingError;
use crate::result::{LintResult, Step};
use crate::testing::Testing;

impl Testing {
    /// Lint one chart
    ///
    /// Steps run in order: maintainers, version bump, yamllint, schema, helm
    /// lint (once per values file, or once without values). A maintainer
    /// failure ends the chart immediately; every other failure is recorded
    /// and the remaining steps still run. Disabled steps are not invoked.
    pub fn lint_chart(&self, chart: &str, values_files: &[PathBuf]) -> LintResult {
        tracing::info!("Linting chart '{}'", chart);
        let mut result = LintResult::new(chart);

        if self.config.validate_maintainers {
            if let Err(e) = self.validate_maintainers(chart) {
                result.record(Step::Maintainers, e);
                return result;
            }
        }

        if self.config.check_version_increment {
            if let Err(e) = self.check_version_increment(chart) {
                result.record(Step::VersionIncrement, e);
            }
        }

        let chart_yaml = Path::new(chart).join(CHART_YAML);

        if !self.config.skip_yaml_lint {
            let lint_conf = self.config.lint_conf.as_deref();
            for file in yaml_lint_targets(chart, values_files) {
                if let Err(e) = self.linter.validate(&file, lint_conf) {
                    result.record(Step::YamlLint, e);
                }
            }
        }

        if !self.config.skip_schema_validation {
            match self.config.chart_yaml_schema.as_deref() {
                Some(schema) => {
                    if let Err(e) = self.schema_validator.validate(&chart_yaml, schema) {
                        result.record(Step::SchemaValidation, e);
                    }
                }
                None => result.record(Step::SchemaValidation, TestingError::MissingSchema),
            }
        }

        if values_files.is_empty() {
            if let Err(e) = self.helm.lint_with_values(chart, None) {
                result.record(Step::HelmLint, e);
            }
        } else {
            for values_file in values_files {
                if let Err(e) = self.helm.lint_with_values(chart, Some(values_file.as_path())) {
                    result.record(Step::HelmLint, e);
                }
            }
        }

        result
    }
}

/// `Chart.yaml`, `values.yaml` when present, then every CI values file
fn yaml_lint_targets(chart: &str, values_files: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = vec![Path::new(chart).join(CHART_YAML)];
    let values_yaml = Path::new(chart).join(VALUES_YAML);
    if values_yaml.is_file() {
        files.push(values_yaml);
    }
    files.extend(values_files.iter().cloned());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, base_config, testdata};
    use ct_core::Configuration;
    use ct_tools::{LinterCounts, MockHelm, MockLinter};

    fn counts(yaml_lint: usize, schema: usize) -> LinterCounts {
        LinterCounts { yaml_lint, schema }
    }

    #[test]
    fn test_lint_chart_maintainer_validation() {
        for validate in [true, false] {
            let config = Configuration {
                validate_maintainers: validate,
                ..base_config()
            };
            let fixture = Fixture::new(config);

            let with = fixture.testing.lint_chart(&testdata("valid_maintainers"), &[]);
            assert!(with.passed(), "validate={}", validate);

            let without = fixture.testing.lint_chart(&testdata("no_maintainers"), &[]);
            assert_eq!(without.passed(), !validate, "validate={}", validate);
        }
    }

    #[test]
    fn test_maintainer_failure_short_circuits() {
        let fixture = Fixture::new(base_config());

        let result = fixture.testing.lint_chart(&testdata("no_maintainers"), &[]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.error().map(|f| f.step), Some(Step::Maintainers));
        assert_eq!(fixture.linter.counts(), counts(0, 0));
        assert_eq!(fixture.helm.log().count("lint"), 0);
    }

    #[test]
    fn test_lint_no_chart_schema_validation() {
        for (skip_schema, expected) in [(false, counts(2, 1)), (true, counts(2, 0))] {
            let config = Configuration {
                skip_schema_validation: skip_schema,
                validate_maintainers: false,
                skip_yaml_lint: false,
                ..base_config()
            };
            let fixture = Fixture::new(config);

            let result = fixture.testing.lint_chart(&testdata("test_lints"), &[]);
            assert!(result.passed());
            assert_eq!(fixture.linter.counts(), expected, "skip_schema={}", skip_schema);
        }
    }

    #[test]
    fn test_lint_no_yaml_lint_validation() {
        for (skip_yaml_lint, expected) in [(false, counts(2, 1)), (true, counts(0, 1))] {
            let config = Configuration {
                skip_yaml_lint,
                skip_schema_validation: false,
                validate_maintainers: false,
                ..base_config()
            };
            let fixture = Fixture::new(config);

            let result = fixture.testing.lint_chart(&testdata("test_lints"), &[]);
            assert!(result.passed());
            assert_eq!(fixture.linter.counts(), expected, "skip_yaml_lint={}", skip_yaml_lint);
        }
    }

    #[test]
    fn test_both_validators_disabled() {
        let config = Configuration {
            skip_yaml_lint: true,
            skip_schema_validation: true,
            ..base_config()
        };
        let fixture = Fixture::new(config);

        let result = fixture.testing.lint_chart(&testdata("test_lints"), &[]);
        assert!(result.passed());
        assert_eq!(fixture.linter.counts(), counts(0, 0));
        assert_eq!(fixture.helm.log().count("lint"), 1);
    }

    #[test]
    fn test_missing_values_yaml_is_not_linted() {
        let fixture = Fixture::new(base_config());

        let result = fixture.testing.lint_chart(&testdata("valid_maintainers"), &[]);
        assert!(result.passed());
        assert_eq!(fixture.linter.counts(), counts(1, 1));
    }

    #[test]
    fn test_yaml_lint_failure_does_not_stop_schema_validation() {
        let config = Configuration {
            validate_maintainers: false,
            ..base_config()
        };
        let fixture = Fixture::with_linter(config, MockLinter::new().failing_yaml_lint());

        let result = fixture.testing.lint_chart(&testdata("test_lints"), &[]);
        assert!(!result.passed());
        assert_eq!(fixture.linter.counts(), counts(2, 1));
        assert_eq!(result.failures.len(), 2);
        assert!(result.failures.iter().all(|f| f.step == Step::YamlLint));
    }

    #[test]
    fn test_last_failure_is_reported() {
        let config = Configuration {
            validate_maintainers: false,
            ..base_config()
        };
        let linter = MockLinter::new().failing_yaml_lint().failing_schema();
        let fixture = Fixture::with_linter(config, linter);

        let result = fixture.testing.lint_chart(&testdata("test_lints"), &[]);
        assert_eq!(result.failures.len(), 3);
        assert_eq!(result.error().map(|f| f.step), Some(Step::SchemaValidation));
    }

    #[test]
    fn test_missing_schema_is_a_failure() {
        let config = Configuration {
            chart_yaml_schema: None,
            ..base_config()
        };
        let fixture = Fixture::new(config);

        let result = fixture.testing.lint_chart(&testdata("test_lints"), &[]);
        assert!(matches!(
            result.error().map(|f| &f.error),
            Some(TestingError::MissingSchema)
        ));
        assert_eq!(fixture.linter.counts().schema, 0);
    }

    #[test]
    fn test_helm_lint_per_values_file() {
        let fixture = Fixture::new(base_config());
        let chart = testdata("test_lints");
        let values = vec![
            PathBuf::from("ci/a-values.yaml"),
            PathBuf::from("ci/b-values.yaml"),
        ];

        let result = fixture.testing.lint_chart(&chart, &values);
        assert!(result.passed());
        assert_eq!(
            fixture.helm.log().calls(),
            vec![
                format!("lint {} --values ci/a-values.yaml", chart),
                format!("lint {} --values ci/b-values.yaml", chart),
            ]
        );
    }

    #[test]
    fn test_yaml_lint_covers_ci_values_files() {
        let config = Configuration {
            skip_schema_validation: true,
            ..base_config()
        };
        let fixture = Fixture::new(config);
        let chart = testdata("test_lints");
        let values = vec![
            PathBuf::from("ci/a-values.yaml"),
            PathBuf::from("ci/b-values.yaml"),
        ];

        let result = fixture.testing.lint_chart(&chart, &values);
        assert!(result.passed());
        assert_eq!(
            fixture.linter.files(),
            vec![
                Path::new(&chart).join("Chart.yaml"),
                Path::new(&chart).join("values.yaml"),
                PathBuf::from("ci/a-values.yaml"),
                PathBuf::from("ci/b-values.yaml"),
            ]
        );
        assert_eq!(fixture.linter.counts(), counts(4, 0));
    }

    #[test]
    fn test_helm_lint_failure_is_recorded() {
        let fixture = Fixture::with_helm(base_config(), MockHelm::new().failing("lint"));

        let result = fixture.testing.lint_chart(&testdata("test_lints"), &[]);
        assert_eq!(result.error().map(|f| f.step), Some(Step::HelmLint));
        assert_eq!(fixture.linter.counts(), counts(2, 1));
    }

    #[test]
    fn test_version_check_failure_does_not_stop_linting() {
        let chart = testdata("test_lints");
        let git = ct_tools::MockGit::new().with_branch_file(
            format!("{}/Chart.yaml", chart),
            "name: test_lints\nversion: 9.9.9\n",
        );
        let config = Configuration {
            check_version_increment: true,
            ..base_config()
        };
        let fixture = Fixture::with_git(config, git);

        let result = fixture.testing.lint_chart(&chart, &[]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.error().map(|f| f.step), Some(Step::VersionIncrement));
        assert_eq!(fixture.linter.counts(), counts(2, 1));
    }
}

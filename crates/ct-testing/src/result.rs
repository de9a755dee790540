//! Per-chart and per-run outcomes

use std::fmt;

use crate::error::{Result, TestingError};

/// Pipeline step a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ValuesFiles,
    Maintainers,
    VersionIncrement,
    YamlLint,
    SchemaValidation,
    HelmLint,
    Dependencies,
    Install,
    ChartTest,
    Readiness,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::ValuesFiles => "values discovery",
            Step::Maintainers => "maintainer validation",
            Step::VersionIncrement => "version check",
            Step::YamlLint => "yaml lint",
            Step::SchemaValidation => "schema validation",
            Step::HelmLint => "helm lint",
            Step::Dependencies => "dependency build",
            Step::Install => "install",
            Step::ChartTest => "chart test",
            Step::Readiness => "readiness",
        };
        f.write_str(name)
    }
}

/// A failed step
#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    pub error: TestingError,
}

impl StepFailure {
    pub fn new(step: Step, error: impl Into<TestingError>) -> Self {
        Self {
            step,
            error: error.into(),
        }
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.error)
    }
}

/// Outcome of linting and/or installing one chart
///
/// Every failed step is kept in order; [`TestResult::error`] reports the
/// last one.
#[derive(Debug)]
pub struct TestResult {
    pub chart: String,
    pub failures: Vec<StepFailure>,
}

/// Lint outcome of one chart
pub type LintResult = TestResult;

impl TestResult {
    pub fn new(chart: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            failures: Vec::new(),
        }
    }

    /// Record a failed step
    pub fn record(&mut self, step: Step, error: impl Into<TestingError>) {
        self.failures.push(StepFailure::new(step, error));
    }

    /// Append the failures of another run of the same chart
    pub fn absorb(&mut self, other: TestResult) {
        self.failures.extend(other.failures);
    }

    /// The last recorded failure, if any
    pub fn error(&self) -> Option<&StepFailure> {
        self.failures.last()
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct TestReport {
    pub results: Vec<TestResult>,
}

impl TestReport {
    /// True when every chart passed (and trivially when there were none)
    pub fn passed(&self) -> bool {
        self.results.iter().all(TestResult::passed)
    }

    /// Results of failed charts
    pub fn failed(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Turn a failed run into an error
    pub fn ensure_passed(&self) -> Result<()> {
        let failed = self.failed().count();
        if failed == 0 {
            Ok(())
        } else {
            Err(TestingError::ChartsFailed {
                failed,
                total: self.results.len(),
            })
        }
    }
}

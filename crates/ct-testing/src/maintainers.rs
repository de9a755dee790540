//! Maintainer validation

use ct_core::ChartYaml;

use crate::error::{Result, TestingError};
use crate::testing::Testing;

impl Testing {
    /// Require at least one maintainer in the chart's `Chart.yaml`
    ///
    /// A non-empty `maintainers` list always passes. An empty list passes
    /// only when the deprecated legacy field is present.
    pub fn validate_maintainers(&self, chart: &str) -> Result<()> {
        tracing::info!("Validating maintainers...");
        let chart_yaml = self.chart_utils.read_chart_yaml(chart)?;
        check_maintainers(chart, &chart_yaml)
    }
}

fn check_maintainers(chart: &str, chart_yaml: &ChartYaml) -> Result<()> {
    if chart_yaml.has_maintainers() {
        return Ok(());
    }

    if chart_yaml.has_deprecated() {
        tracing::debug!("'{}' relies on the deprecated maintainer field", chart);
        return Ok(());
    }

    Err(TestingError::MissingMaintainers {
        chart: chart.to_string(),
    })
}

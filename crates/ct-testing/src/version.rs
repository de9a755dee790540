//! Chart version bump check

use ct_core::{CHART_YAML, ChartYaml};

use crate::error::{Result, TestingError};
use crate::testing::Testing;

impl Testing {
    /// Require the chart version to be greater than on the target branch
    ///
    /// Charts that do not exist on the target branch yet always pass.
    pub fn check_version_increment(&self, chart: &str) -> Result<()> {
        tracing::info!("Checking chart '{}' for a version bump...", chart);

        let remote = &self.config.remote;
        let branch = &self.config.target_branch;
        let chart_yaml = format!("{}/{}", chart.trim_end_matches('/'), CHART_YAML);

        if !self.git.file_exists_on_branch(&chart_yaml, remote, branch) {
            tracing::info!(
                "Unable to find chart on {}/{}. New chart detected.",
                remote,
                branch
            );
            return Ok(());
        }

        let old = ChartYaml::from_yaml(&self.git.show(&chart_yaml, remote, branch)?)?.semver()?;
        let new = self.chart_utils.read_chart_yaml(chart)?.semver()?;
        tracing::debug!("Old chart version: {}, new chart version: {}", old, new);

        if new > old {
            Ok(())
        } else {
            Err(TestingError::VersionNotIncremented {
                old: old.to_string(),
                new: new.to_string(),
            })
        }
    }
}

//! Chart discovery: changed charts and all charts

use ct_core::chart_name;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::testing::Testing;

impl Testing {
    /// Charts changed between the merge base of the target branch and `HEAD`
    pub fn compute_changed_chart_directories(&self) -> Result<Vec<String>> {
        let merge_base = self.git.merge_base(&self.config.target_ref(), "HEAD")?;
        self.changed_chart_directories_since(&merge_base)
    }

    /// Charts owning the files changed since `commit`
    ///
    /// Each file is attributed to its closest ancestor chart directory below
    /// a configured root. Files outside any chart and excluded charts are
    /// dropped. The result is sorted and free of duplicates.
    pub fn changed_chart_directories_since(&self, commit: &str) -> Result<Vec<String>> {
        let changed = self
            .git
            .list_changed_files_in_dirs(commit, &self.config.chart_dirs)?;

        let mut dirs = BTreeSet::new();
        for file in &changed {
            let Some(dir) = self.lookup_chart_dir(file) else {
                tracing::debug!("'{}' is not part of a chart, skipping", file);
                continue;
            };
            if self.config.is_excluded(chart_name(&dir)) {
                continue;
            }
            dirs.insert(dir);
        }

        Ok(dirs.into_iter().collect())
    }

    /// Every chart directory directly below the configured roots
    ///
    /// Roots are processed in configured order; within a root the lister's
    /// order is kept.
    pub fn read_all_chart_directories(&self) -> Result<Vec<String>> {
        let accept = |dir: &str| {
            !self.config.is_excluded(chart_name(dir)) && self.chart_utils.is_chart_dir(dir)
        };

        let mut dirs = Vec::new();
        for root in &self.config.chart_dirs {
            dirs.extend(self.directory_lister.list_child_dirs(root, &accept)?);
        }
        Ok(dirs)
    }

    fn lookup_chart_dir(&self, file: &str) -> Option<String> {
        let mut current = Path::new(file).parent();
        while let Some(dir) = current {
            if !self.is_below_root(dir) {
                return None;
            }
            let dir_str = dir.to_str()?;
            if self.chart_utils.is_chart_dir(dir_str) {
                return Some(dir_str.to_string());
            }
            current = dir.parent();
        }
        None
    }

    fn is_below_root(&self, dir: &Path) -> bool {
        if dir.as_os_str().is_empty() {
            return false;
        }
        self.config.chart_dirs.iter().any(|root| {
            let root = root.trim_start_matches("./").trim_end_matches('/');
            if root.is_empty() || root == "." {
                return true;
            }
            let root = Path::new(root);
            dir != root && dir.starts_with(root)
        })
    }
}

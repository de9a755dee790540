//! Run configuration
//!
//! Settings are read from `ct.yaml` (searched in `.`, `~/.ct` and `/etc/ct`)
//! and overridden by command-line flags. Once a run starts the configuration
//! is read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Config file names, in lookup order
const CONFIG_FILE_NAMES: [&str; 2] = ["ct.yaml", "ct.yml"];

/// Default yamllint configuration file name
pub const LINT_CONF_FILE: &str = "lintconf.yaml";

/// Default chart schema file name
pub const CHART_SCHEMA_FILE: &str = "chart_schema.yaml";

/// Per-run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Git remote used to compute the merge base
    pub remote: String,

    /// Branch the changes are compared against
    pub target_branch: String,

    /// CI build id, used to derive release and namespace names
    pub build_id: Option<String>,

    /// yamllint configuration file
    pub lint_conf: Option<PathBuf>,

    /// Schema for `Chart.yaml` (yamale `.yaml` or JSON Schema `.json`)
    pub chart_yaml_schema: Option<PathBuf>,

    /// Require maintainers in `Chart.yaml`
    pub validate_maintainers: bool,

    /// Skip `Chart.yaml` schema validation
    pub skip_schema_validation: bool,

    /// Skip yamllint on `Chart.yaml` and `values.yaml`
    pub skip_yaml_lint: bool,

    /// Require a version bump against the target branch
    pub check_version_increment: bool,

    /// Process all charts instead of only changed ones
    pub all: bool,

    /// Explicit chart directories to process
    pub charts: Vec<String>,

    /// Chart repositories to add, as `name=url`
    pub chart_repos: Vec<String>,

    /// Extra arguments passed to helm install/test/delete
    pub helm_extra_args: Vec<String>,

    /// Directories containing charts, in processing order
    pub chart_dirs: Vec<String>,

    /// Chart names that are never processed
    pub excluded_charts: BTreeSet<String>,

    /// Shared namespace to install into (one namespace per release if unset)
    pub namespace: Option<String>,

    /// Label selecting the resources of a release in a shared namespace
    pub release_label: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            target_branch: "master".to_string(),
            build_id: None,
            lint_conf: None,
            chart_yaml_schema: None,
            validate_maintainers: true,
            skip_schema_validation: false,
            skip_yaml_lint: false,
            check_version_increment: true,
            all: false,
            charts: Vec::new(),
            chart_repos: Vec::new(),
            helm_extra_args: Vec::new(),
            chart_dirs: vec!["charts".to_string()],
            excluded_charts: BTreeSet::new(),
            namespace: None,
            release_label: "app.kubernetes.io/instance".to_string(),
        }
    }
}

impl Configuration {
    /// Load the first config file found in the search directories, or defaults
    pub fn discover() -> Result<Self> {
        let dirs = Self::search_dirs();
        let found = CONFIG_FILE_NAMES
            .iter()
            .find_map(|name| locate_in(&dirs, name));

        match found {
            Some(path) => {
                tracing::debug!("Using config file {}", path.display());
                Self::load_from(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Directories searched for `ct.yaml`, `lintconf.yaml` and `chart_schema.yaml`
    pub fn search_dirs() -> Vec<PathBuf> {
        let mut dirs = vec![PathBuf::from(".")];
        if let Some(home) = dirs::home_dir() {
            dirs.push(home.join(".ct"));
        }
        dirs.push(PathBuf::from("/etc/ct"));
        dirs
    }

    /// Fill in `lint-conf` and `chart-yaml-schema` from the search directories
    pub fn resolve_support_files(&mut self) {
        let dirs = Self::search_dirs();
        if self.lint_conf.is_none() {
            self.lint_conf = locate_in(&dirs, LINT_CONF_FILE);
        }
        if self.chart_yaml_schema.is_none() {
            self.chart_yaml_schema = locate_in(&dirs, CHART_SCHEMA_FILE);
        }
    }

    /// Check settings that cannot be expressed in the type
    pub fn validate(&self) -> Result<()> {
        if self.chart_dirs.is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "at least one chart directory is required".to_string(),
            });
        }
        if self.remote.trim().is_empty() || self.target_branch.trim().is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "remote and target branch must not be empty".to_string(),
            });
        }
        self.parsed_chart_repos().map(|_| ())
    }

    /// Check whether a chart name is excluded
    #[inline]
    pub fn is_excluded(&self, chart_name: &str) -> bool {
        self.excluded_charts.contains(chart_name)
    }

    /// Parse the configured chart repositories
    pub fn parsed_chart_repos(&self) -> Result<Vec<ChartRepo>> {
        self.chart_repos.iter().map(|r| ChartRepo::parse(r)).collect()
    }

    /// Remote tracking ref of the target branch
    pub fn target_ref(&self) -> String {
        format!("{}/{}", self.remote, self.target_branch)
    }
}

/// A chart repository to add before installing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRepo {
    pub name: String,
    pub url: String,
}

impl ChartRepo {
    /// Parse a `name=url` entry
    pub fn parse(entry: &str) -> Result<Self> {
        match entry.split_once('=') {
            Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => Ok(Self {
                name: name.trim().to_string(),
                url: url.trim().to_string(),
            }),
            _ => Err(CoreError::InvalidConfig {
                message: format!("invalid chart repo '{}', expected name=url", entry),
            }),
        }
    }
}

/// First existing `name` in `dirs`
fn locate_in(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter().map(|dir| dir.join(name)).find(|path| path.is_file())
}

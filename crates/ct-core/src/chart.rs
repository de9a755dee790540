//! Chart descriptor definition and loading

use serde::{Deserialize, Deserializer, Serialize};
use semver::Version;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Descriptor file that marks a directory as a chart
pub const CHART_YAML: &str = "Chart.yaml";

/// Default values file of a chart
pub const VALUES_YAML: &str = "values.yaml";

/// Parsed `Chart.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartYaml {
    /// API version (v1 or v2)
    #[serde(default)]
    pub api_version: Option<String>,

    /// Chart name (required)
    pub name: String,

    /// Chart version (required, SemVer)
    pub version: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Application version
    #[serde(default)]
    pub app_version: Option<String>,

    /// Maintainers
    #[serde(default, deserialize_with = "null_as_empty")]
    pub maintainers: Vec<Maintainer>,

    /// Deprecated legacy field
    ///
    /// Older charts mark themselves with `deprecated: true` or carry a single
    /// maintainer here instead of the `maintainers` list.
    #[serde(default)]
    pub deprecated: Option<Deprecated>,
}

/// Maintainer information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The shapes accepted for the deprecated field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deprecated {
    /// `deprecated: true`
    Flag(bool),
    /// `deprecated: "Jane Doe <jane@example.com>"`
    Maintainer(String),
    /// `deprecated: { name: ..., email: ... }`
    Entry(Maintainer),
}

impl Deprecated {
    /// Whether the field carries a usable value
    pub fn is_present(&self) -> bool {
        match self {
            Deprecated::Flag(flag) => *flag,
            Deprecated::Maintainer(name) => !name.trim().is_empty(),
            Deprecated::Entry(maintainer) => !maintainer.name.trim().is_empty(),
        }
    }
}

impl ChartYaml {
    /// Load a descriptor from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a descriptor from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let chart: ChartYaml = serde_yaml::from_str(yaml)?;
        if chart.name.trim().is_empty() {
            return Err(CoreError::InvalidChart {
                message: "name must not be empty".to_string(),
            });
        }
        Ok(chart)
    }

    /// Parse the chart version as SemVer
    pub fn semver(&self) -> Result<Version> {
        Ok(Version::parse(self.version.trim_start_matches('v'))?)
    }

    /// Check if the current-format maintainer list has entries
    #[inline]
    pub fn has_maintainers(&self) -> bool {
        !self.maintainers.is_empty()
    }

    /// Check if the deprecated field is present
    pub fn has_deprecated(&self) -> bool {
        self.deprecated.as_ref().is_some_and(Deprecated::is_present)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Maintainer>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Maintainer>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decides what is a chart and reads chart descriptors
pub trait ChartClassifier {
    /// Check whether `dir` contains a chart descriptor
    fn is_chart_dir(&self, dir: &str) -> bool;

    /// Read and parse the descriptor of the chart in `dir`
    fn read_chart_yaml(&self, dir: &str) -> Result<ChartYaml>;

    /// The chart's `ci/*-values.yaml` files, sorted
    fn ci_values_files(&self, dir: &str) -> Result<Vec<PathBuf>> {
        find_ci_values_files(dir)
    }
}

/// Filesystem-backed [`ChartClassifier`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartUtils;

impl ChartClassifier for ChartUtils {
    fn is_chart_dir(&self, dir: &str) -> bool {
        Path::new(dir).join(CHART_YAML).is_file()
    }

    fn read_chart_yaml(&self, dir: &str) -> Result<ChartYaml> {
        let root = Path::new(dir);
        if !root.exists() {
            return Err(CoreError::ChartNotFound {
                path: root.display().to_string(),
            });
        }

        let chart_file = root.join(CHART_YAML);
        if !chart_file.exists() {
            return Err(CoreError::InvalidChart {
                message: format!("{} not found in {}", CHART_YAML, root.display()),
            });
        }

        ChartYaml::from_file(chart_file)
    }
}

/// Last path segment of a chart directory
pub fn chart_name(dir: &str) -> &str {
    Path::new(dir)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(dir)
}

/// Values files used for CI runs (`<chart>/ci/*-values.yaml`)
///
/// Files are sorted alphabetically for deterministic ordering.
pub fn find_ci_values_files<P: AsRef<Path>>(chart_dir: P) -> Result<Vec<PathBuf>> {
    let ci_dir = chart_dir.as_ref().join("ci");
    if !ci_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(&ci_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| CoreError::Io(e.into()))?;
        let path = entry.path();
        let is_values = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with("-values.yaml"));
        if path.is_file() && is_values {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

//! CLI error types with exit code handling

use ct_core::CoreError;
use ct_testing::TestingError;
use ct_tools::ToolError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Config file or flags are unusable
    #[error("Configuration error: {message}")]
    #[diagnostic(code(ct::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A tool failed while selecting charts or preparing the run
    #[error("{message}")]
    #[diagnostic(code(ct::cli::tool))]
    Tool { message: String },

    /// One or more charts failed
    #[error("{failed} of {total} chart(s) failed")]
    #[diagnostic(
        code(ct::cli::charts_failed),
        help("see the summary above for the failing step of each chart")
    )]
    ChartsFailed { failed: usize, total: usize },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(ct::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Tool { .. } => exit_codes::TOOL_ERROR,
            CliError::ChartsFailed { .. } => exit_codes::ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            CoreError::InvalidConfig { message } => CliError::Config {
                message,
                help: None,
            },
            other => CliError::Config {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<ToolError> for CliError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Core(e) => e.into(),
            ToolError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            other => CliError::Tool {
                message: other.to_string(),
            },
        }
    }
}

impl From<TestingError> for CliError {
    fn from(err: TestingError) -> Self {
        match err {
            TestingError::Core(e) => e.into(),
            TestingError::Tool(e) => e.into(),
            TestingError::ChartsFailed { failed, total } => CliError::ChartsFailed { failed, total },
            other => CliError::Tool {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

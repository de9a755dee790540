//! Error types for ct-tools

use ct_core::CoreError;
use thiserror::Error;

/// Result type for ct-tools operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while running external tools
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolError {
    /// The program could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and reported failure
    #[error("command failed: {command} ({status}){}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Chart or schema handling error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}

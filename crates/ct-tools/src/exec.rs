//! Blocking process execution
//!
//! Commands run to completion; there is no timeout. Failures carry the full
//! command line and, when captured, stderr.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use crate::error::{Result, ToolError};

/// Runs external programs
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Run a program with inherited stdout/stderr
    pub fn run_process<I, S>(&self, program: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (mut command, command_line) = build_command(program, args);
        tracing::debug!(">>> {}", command_line);

        let status = command
            .stdin(Stdio::null())
            .status()
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::CommandFailed {
                command: command_line,
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }

    /// Run a program and return its trimmed stdout
    pub fn run_process_and_capture_output<I, S>(&self, program: &str, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (mut command, command_line) = build_command(program, args);
        tracing::debug!(">>> {}", command_line);

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(ToolError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

fn build_command<I, S>(program: &str, args: I) -> (Command, String)
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    let mut line = program.to_string();
    for arg in args {
        let arg = arg.as_ref();
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
        command.arg(arg);
    }
    (command, line)
}

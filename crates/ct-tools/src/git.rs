//! Git integration

use crate::error::Result;
use crate::exec::ProcessExecutor;

/// Version control operations used to find changed charts
pub trait Git {
    /// Best common ancestor of two commits
    fn merge_base(&self, commit1: &str, commit2: &str) -> Result<String>;

    /// Files under `dirs` that changed since `commit`
    fn list_changed_files_in_dirs(&self, commit: &str, dirs: &[String]) -> Result<Vec<String>>;

    /// Check if `file` exists on `remote/branch`
    fn file_exists_on_branch(&self, file: &str, remote: &str, branch: &str) -> bool;

    /// Content of `file` on `remote/branch`
    fn show(&self, file: &str, remote: &str, branch: &str) -> Result<String>;
}

/// [`Git`] backed by the `git` binary
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    exec: ProcessExecutor,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Git for GitCli {
    fn merge_base(&self, commit1: &str, commit2: &str) -> Result<String> {
        self.exec
            .run_process_and_capture_output("git", ["merge-base", commit1, commit2])
    }

    fn list_changed_files_in_dirs(&self, commit: &str, dirs: &[String]) -> Result<Vec<String>> {
        let mut args = vec![
            "diff".to_string(),
            "--find-renames".to_string(),
            "--name-only".to_string(),
            commit.to_string(),
            "--".to_string(),
        ];
        args.extend(dirs.iter().cloned());

        let output = self.exec.run_process_and_capture_output("git", &args)?;
        Ok(non_empty_lines(&output))
    }

    fn file_exists_on_branch(&self, file: &str, remote: &str, branch: &str) -> bool {
        let object = format!("{}/{}:{}", remote, branch, file);
        self.exec
            .run_process_and_capture_output("git", ["cat-file", "-e", object.as_str()])
            .is_ok()
    }

    fn show(&self, file: &str, remote: &str, branch: &str) -> Result<String> {
        let object = format!("{}/{}:{}", remote, branch, file);
        self.exec
            .run_process_and_capture_output("git", ["show", object.as_str()])
    }
}

fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

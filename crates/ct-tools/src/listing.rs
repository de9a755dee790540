//! Chart root directory listing

use std::path::Path;

use crate::error::Result;

/// Lists the immediate child directories of a parent directory
pub trait DirectoryLister {
    /// Child directories of `parent` accepted by `test`
    ///
    /// Entries are returned as `parent/child` in a stable order.
    fn list_child_dirs(&self, parent: &str, test: &dyn Fn(&str) -> bool) -> Result<Vec<String>>;
}

/// Filesystem-backed [`DirectoryLister`], sorted by file name
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn list_child_dirs(&self, parent: &str, test: &dyn Fn(&str) -> bool) -> Result<Vec<String>> {
        let mut dirs = Vec::new();

        for entry in walkdir::WalkDir::new(parent)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = Path::new(parent)
                .join(entry.file_name())
                .to_string_lossy()
                .into_owned();
            if test(&dir) {
                dirs.push(dir);
            }
        }

        Ok(dirs)
    }
}

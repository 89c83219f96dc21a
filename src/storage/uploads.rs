//! Uploaded batch files
//!
//! Every imported CSV is kept under its own file name in the uploads
//! directory so it can be summarized on its own later.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::copy_atomic;

/// Repository for the uploads directory
pub struct UploadRepository {
    dir: PathBuf,
}

impl UploadRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy a batch into the uploads directory, keeping its file name
    ///
    /// An existing upload with the same name is replaced.
    pub fn store(&self, source: &Path) -> ExpenseResult<String> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ExpenseError::Import(format!("Invalid file name: {}", source.display()))
            })?
            .to_string();

        copy_atomic(source, self.dir.join(&name))?;
        Ok(name)
    }

    /// Names of the stored CSV batches, sorted
    pub fn list(&self) -> ExpenseResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            ExpenseError::Storage(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_csv_name(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Path of a stored batch
    ///
    /// Only bare file names are accepted, so a request cannot reach outside
    /// the uploads directory.
    pub fn resolve(&self, name: &str) -> ExpenseResult<PathBuf> {
        let is_bare = !name.is_empty()
            && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
            && !name.contains(['/', '\\']);

        if !is_bare {
            return Err(ExpenseError::file_not_found(name));
        }

        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(ExpenseError::file_not_found(name));
        }

        Ok(path)
    }
}

/// Whether a file name carries the `.csv` extension
pub fn is_csv_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

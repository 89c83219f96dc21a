//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ExpenseError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ExpenseError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = path.with_extension("json.tmp");

    write_atomic(path, &temp_path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| ExpenseError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Copy a file atomically into `dest`, replacing any previous copy
pub fn copy_atomic<P, Q>(source: P, dest: Q) -> Result<(), ExpenseError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    let dest = dest.as_ref();
    let temp_path = dest.with_extension("part");

    let mut input = File::open(source).map_err(|e| {
        ExpenseError::Storage(format!("Failed to open {}: {}", source.display(), e))
    })?;

    write_atomic(dest, &temp_path, |writer| {
        std::io::copy(&mut input, writer)
            .map(|_| ())
            .map_err(|e| ExpenseError::Storage(format!("Failed to copy data: {}", e)))
    })
}

/// Write through a temp file in the same directory, sync, then rename over `path`
fn write_atomic<F>(path: &Path, temp_path: &Path, fill: F) -> Result<(), ExpenseError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ExpenseError>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(temp_path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    if let Err(e) = fill(&mut writer) {
        drop(writer);
        let _ = fs::remove_file(temp_path);
        return Err(e);
    }

    writer
        .flush()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        ExpenseError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

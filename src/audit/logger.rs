//! Append-only import log
//!
//! One JSON object per line. A line that fails to parse (for example a
//! write cut short by a crash) is skipped with a warning rather than making
//! the whole log unreadable.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// Writes and reads `audit.log`
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush it to disk
    pub fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open audit log: {}", e)))?;

        // Single write so concurrent appenders never interleave within a line
        file.write_all(line.as_bytes())
            .and_then(|_| file.sync_data())
            .map_err(|e| ExpenseError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every readable entry, oldest first
    pub fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count);
        self.for_each_entry(|entry| {
            if count == 0 {
                return;
            }
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        })?;
        Ok(window.into())
    }

    fn for_each_entry(&self, mut visit: impl FnMut(AuditEntry)) -> ExpenseResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(ExpenseError::Io(format!("Failed to open audit log: {}", e))),
        };

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                ExpenseError::Io(format!("Failed to read audit log line {}: {}", idx + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entry) => visit(entry),
                Err(e) => warn!(line = idx + 1, error = %e, "skipping malformed audit entry"),
            }
        }

        Ok(())
    }
}

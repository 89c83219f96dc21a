//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A batch was uploaded and appended to the store
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// File name of the uploaded batch
    pub source: String,

    /// Rows appended to the store
    pub imported: usize,

    /// Rows rejected during parsing
    pub rejected: usize,

    /// Ids assigned to the appended rows, as a "first-last" range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_range: Option<String>,
}

impl AuditEntry {
    /// Create an entry for a completed import
    pub fn import(source: impl Into<String>, ids: &[u64], rejected: usize) -> Self {
        let id_range = match (ids.first(), ids.last()) {
            (Some(first), Some(last)) => Some(format!("{}-{}", first, last)),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation: Operation::Import,
            source: source.into(),
            imported: ids.len(),
            rejected,
            id_range,
        }
    }

    /// One-line human-readable summary
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {} ({} imported, {} rejected)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.source,
            self.imported,
            self.rejected
        );
        if let Some(range) = &self.id_range {
            line.push_str(&format!(" ids {}", range));
        }
        line
    }
}

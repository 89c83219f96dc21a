//! Audit logging system for SpendLens
//!
//! Records every batch import in an append-only, line-delimited JSON log
//! next to the data directory.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;

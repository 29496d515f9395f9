//! Audit log of submitted transactions
//!
//! Every record the store creates is also appended to `audit.log` as one
//! JSON line, so the history of submissions survives edits to the data file.
//!
//! ```rust,ignore
//! use tally::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Transaction,
//!     record.id.to_string(),
//!     Some(record.merchant.clone()),
//!     &record,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

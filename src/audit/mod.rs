//! Audit logging
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON object per line, with before/after snapshots of the
//! record. `setaside audit` reads it back.
//!
//! # Example
//!
//! ```rust,ignore
//! use setaside::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::FutureExpense,
//!     expense.id.to_string(),
//!     Some(expense.name.clone()),
//!     &expense,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

//! Core data models for SetAside
//!
//! This module contains the flat records of the budgeting domain:
//! transactions, categories, future expenses and the monthly budget profile,
//! plus the form drafts used to create and edit them.

pub mod category;
pub mod form;
pub mod future_expense;
pub mod ids;
pub mod money;
pub mod profile;
pub mod transaction;

pub use category::{Category, EntryKind};
pub use form::{FormError, FutureExpenseDraft, FutureExpenseFields, TransactionDraft, TransactionFields};
pub use future_expense::{FutureExpense, Urgency};
pub use ids::{CategoryId, FixedExpenseId, FutureExpenseId, TransactionId};
pub use money::Money;
pub use profile::{BudgetProfile, FixedExpense};
pub use transaction::Transaction;

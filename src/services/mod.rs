//! Service layer for SetAside
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations.

pub mod budget;
pub mod category;
pub mod future_expense;
pub mod profile;
pub mod transaction;

pub use budget::{BudgetService, DashboardSummary};
pub use category::{CategoryService, CategoryUsage};
pub use future_expense::{FutureExpenseService, FutureExpenseSummary};
pub use profile::ProfileService;
pub use transaction::{TransactionFilter, TransactionService};

use crate::error::{SetAsideError, SetAsideResult};

/// Reduce ID-prefix matches to at most one record
///
/// A short prefix can match several records; that is reported instead of
/// picking one arbitrarily.
pub(crate) fn single_match<T>(
    mut matches: Vec<T>,
    entity: &str,
    identifier: &str,
) -> SetAsideResult<Option<T>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        n => Err(SetAsideError::Validation(format!(
            "'{}' matches {} {} records; use a longer ID",
            identifier, n, entity
        ))),
    }
}

//! Stateless operations over a [`Ledger`](crate::ledger::Ledger): recording
//! entries, curating categories, and deriving summaries.

pub mod budget_service;
pub mod category_service;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::{BudgetService, MonthlyBudgetStatus};
pub use category_service::CategoryService;
pub use summary_service::{Breakdown, BreakdownEntry, SummaryService, Totals};
pub use transaction_service::TransactionService;

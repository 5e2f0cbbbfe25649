//! Domain state: transactions, categories, and calendar helpers.

pub mod category;
pub mod date;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod recurring;
pub mod transaction;

pub use category::{
    Category, CategoryDraft, CategoryIcon, CategoryKind, COLOR_PALETTE, OTHER_CATEGORY_ID,
    SAVINGS_CATEGORY_ID,
};
pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION, DEFAULT_MONTHLY_LIMIT};
pub use transaction::{Transaction, TransactionDraft, TransactionKind};

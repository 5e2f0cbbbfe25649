use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use super::transaction::Transaction;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Starting monthly spending limit for a fresh ledger.
pub const DEFAULT_MONTHLY_LIMIT: f64 = 1000.0;

/// Canonical in-memory state: transactions, categories, and the monthly limit.
///
/// Transactions are kept in descending date order; mutation goes through the
/// service layer, which re-establishes the ordering after every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "Category::defaults")]
    pub categories: Vec<Category>,
    #[serde(default = "Ledger::monthly_limit_default")]
    pub monthly_limit: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            transactions: Vec::new(),
            categories: Category::defaults(),
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn contains_category(&self, id: Uuid) -> bool {
        self.category(id).is_some()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Inserts a transaction without re-sorting; callers re-establish order.
    pub fn push_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    /// Re-establishes the descending-by-date invariant.
    ///
    /// The sort is stable, so entries sharing a date keep their relative
    /// order across calls.
    pub fn sort_transactions(&mut self) {
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Replaces the transaction sharing `transaction.id`, if present.
    pub fn replace_transaction(&mut self, transaction: Transaction) -> bool {
        match self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == transaction.id)
        {
            Some(slot) => {
                *slot = transaction;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Removes a transaction by id, returning the removed entry.
    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    /// Replaces the category sharing `category.id`, if present.
    pub fn replace_category(&mut self, category: Category) -> bool {
        match self
            .categories
            .iter_mut()
            .find(|existing| existing.id == category.id)
        {
            Some(slot) => {
                *slot = category;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Rewrites every transaction referencing `from` to reference `to`.
    pub fn reassign_category(&mut self, from: Uuid, to: Uuid) -> usize {
        let mut moved = 0;
        for txn in self
            .transactions
            .iter_mut()
            .filter(|txn| txn.category_id == from)
        {
            txn.category_id = to;
            moved += 1;
        }
        if moved > 0 {
            self.touch();
        }
        moved
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn monthly_limit_default() -> f64 {
        DEFAULT_MONTHLY_LIMIT
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

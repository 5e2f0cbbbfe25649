//! Facade over the ledger: every mutation funnels through here so state
//! changes can be observed by subscribers such as the autosave worker.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::Result;
use crate::ledger::category::{Category, CategoryDraft};
use crate::ledger::transaction::{Transaction, TransactionDraft};
use crate::ledger::Ledger;
use crate::services::{
    Breakdown, BudgetService, CategoryService, MonthlyBudgetStatus, SummaryService, Totals,
    TransactionService,
};
use crate::storage::StorageBackend;

/// Callback invoked with the new state after every committed change.
pub type Subscriber = Box<dyn Fn(&Ledger) + Send>;

pub struct Tracker {
    ledger: Ledger,
    subscribers: Vec<Subscriber>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::from_ledger(Ledger::new())
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger,
            subscribers: Vec::new(),
        }
    }

    /// Loads state from `backend`, falling back to a fresh ledger when the
    /// backend cannot produce one.
    pub fn load(backend: &dyn StorageBackend) -> Self {
        match backend.load() {
            Ok(ledger) => {
                tracing::info!(
                    transactions = ledger.transaction_count(),
                    "tracker state loaded"
                );
                Self::from_ledger(ledger)
            }
            Err(err) => {
                tracing::warn!("failed to load tracker state, starting fresh: {err}");
                Self::new()
            }
        }
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    fn commit(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.ledger);
        }
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Uuid> {
        let id = TransactionService::add(&mut self.ledger, draft)?;
        self.commit();
        Ok(id)
    }

    pub fn add_recurring_transaction(
        &mut self,
        template: TransactionDraft,
        months: u32,
    ) -> Result<Vec<Uuid>> {
        let ids = TransactionService::add_recurring(&mut self.ledger, template, months)?;
        self.commit();
        Ok(ids)
    }

    pub fn update_transaction(&mut self, transaction: Transaction) -> Result<bool> {
        let replaced = TransactionService::update(&mut self.ledger, transaction)?;
        if replaced {
            self.commit();
        }
        Ok(replaced)
    }

    pub fn delete_transaction(&mut self, id: Uuid) -> bool {
        let removed = TransactionService::delete(&mut self.ledger, id).is_some();
        if removed {
            self.commit();
        }
        removed
    }

    /// Removes every transaction and restores default categories; the
    /// monthly limit is kept.
    pub fn clear_all_data(&mut self) {
        TransactionService::clear(&mut self.ledger);
        self.commit();
    }

    pub fn add_category(&mut self, draft: CategoryDraft) -> Result<Uuid> {
        let id = CategoryService::add(&mut self.ledger, draft)?;
        self.commit();
        Ok(id)
    }

    pub fn update_category(&mut self, category: Category) -> Result<bool> {
        let replaced = CategoryService::update(&mut self.ledger, category)?;
        if replaced {
            self.commit();
        }
        Ok(replaced)
    }

    pub fn delete_category(&mut self, id: Uuid) -> Result<()> {
        let existed = self.ledger.contains_category(id);
        CategoryService::delete(&mut self.ledger, id)?;
        if existed {
            self.commit();
        }
        Ok(())
    }

    pub fn reset_categories_to_default(&mut self) {
        CategoryService::reset_to_defaults(&mut self.ledger);
        self.commit();
    }

    pub fn set_monthly_limit(&mut self, value: f64) -> Result<()> {
        BudgetService::set_monthly_limit(&mut self.ledger, value)?;
        self.commit();
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        TransactionService::list(&self.ledger)
    }

    pub fn categories(&self) -> &[Category] {
        CategoryService::list(&self.ledger)
    }

    pub fn monthly_limit(&self) -> f64 {
        self.ledger.monthly_limit
    }

    pub fn totals(&self, as_of: NaiveDate) -> Totals {
        SummaryService::totals(&self.ledger, as_of)
    }

    pub fn monthly_budget_status(&self, as_of: NaiveDate) -> Result<MonthlyBudgetStatus> {
        BudgetService::monthly_status(&self.ledger, as_of)
    }

    pub fn category_breakdown(&self, start: NaiveDate, end: NaiveDate) -> Result<Breakdown> {
        SummaryService::category_breakdown(&self.ledger, start, end)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TrackerError;
    use crate::ledger::category::OTHER_CATEGORY_ID;
    use crate::ledger::transaction::TransactionKind;
    use std::sync::{Arc, Mutex};

    fn draft(amount: f64) -> TransactionDraft {
        TransactionDraft::new(
            "entry",
            amount,
            OTHER_CATEGORY_ID,
            chrono::NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid test date"),
            TransactionKind::Expense,
        )
    }

    #[test]
    fn commands_notify_subscribers_only_on_state_changes() {
        let mut tracker = Tracker::new();
        let notifications = Arc::new(Mutex::new(0usize));
        let seen = Arc::clone(&notifications);
        tracker.subscribe(Box::new(move |_| {
            *seen.lock().expect("counter lock") += 1;
        }));

        let id = tracker.add_transaction(draft(-10.0)).expect("add entry");
        assert_eq!(*notifications.lock().expect("counter lock"), 1);

        // Rejected input leaves state untouched and stays silent.
        assert!(tracker.add_transaction(draft(10.0)).is_err());
        assert_eq!(*notifications.lock().expect("counter lock"), 1);

        // Unknown-id deletes are no-ops and stay silent too.
        assert!(!tracker.delete_transaction(Uuid::new_v4()));
        assert_eq!(*notifications.lock().expect("counter lock"), 1);

        assert!(tracker.delete_transaction(id));
        assert_eq!(*notifications.lock().expect("counter lock"), 2);

        tracker.set_monthly_limit(600.0).expect("valid limit");
        assert_eq!(*notifications.lock().expect("counter lock"), 3);
    }

    #[test]
    fn load_falls_back_to_defaults_on_backend_failure() {
        struct BrokenBackend;
        impl StorageBackend for BrokenBackend {
            fn save(&self, _ledger: &Ledger) -> Result<()> {
                Err(TrackerError::Storage("save unavailable".into()))
            }
            fn load(&self) -> Result<Ledger> {
                Err(TrackerError::Storage("load unavailable".into()))
            }
        }

        let tracker = Tracker::load(&BrokenBackend);
        assert!(tracker.transactions().is_empty());
        assert_eq!(tracker.categories().len(), 10);
    }
}

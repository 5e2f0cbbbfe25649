use uuid::Uuid;

use crate::errors::{Result, TrackerError};
use crate::ledger::category::{Category, CategoryDraft, OTHER_CATEGORY_ID};
use crate::ledger::Ledger;

/// Curates the category registry: additions, edits, protected deletions, and
/// the factory reset.
pub struct CategoryService;

impl CategoryService {
    pub fn add(ledger: &mut Ledger, mut draft: CategoryDraft) -> Result<Uuid> {
        let trimmed = draft.name.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::InvalidInput(
                "category name must not be empty".into(),
            ));
        }
        draft.name = trimmed.to_string();
        let id = ledger.add_category(Category::from_draft(draft));
        tracing::debug!(%id, "category added");
        Ok(id)
    }

    /// Replaces the stored category sharing `category.id`.
    ///
    /// Protected categories accept edits; only deletion is restricted.
    pub fn update(ledger: &mut Ledger, mut category: Category) -> Result<bool> {
        let trimmed = category.name.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::InvalidInput(
                "category name must not be empty".into(),
            ));
        }
        category.name = trimmed.to_string();
        let replaced = ledger.replace_category(category);
        if !replaced {
            tracing::debug!("update targeted an unknown category id");
        }
        Ok(replaced)
    }

    /// Deletes a category, moving its transactions under Other first.
    ///
    /// Protected categories refuse deletion; unknown ids are a no-op.
    pub fn delete(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        if Category::is_protected_id(id) {
            let name = ledger
                .category(id)
                .map(|category| category.name.clone())
                .unwrap_or_else(|| id.to_string());
            return Err(TrackerError::ProtectedCategory(name));
        }
        if !ledger.contains_category(id) {
            tracing::debug!(%id, "delete targeted an unknown category id");
            return Ok(());
        }

        let moved = ledger.reassign_category(id, OTHER_CATEGORY_ID);
        ledger.categories.retain(|category| category.id != id);
        ledger.touch();
        tracing::debug!(%id, moved, "category deleted");
        Ok(())
    }

    /// Restores the default category set, leaving transactions untouched.
    ///
    /// Entries that pointed at a custom category keep their now-dangling
    /// reference; read paths render them as missing.
    pub fn reset_to_defaults(ledger: &mut Ledger) {
        ledger.categories = Category::defaults();
        ledger.touch();
        tracing::info!("categories reset to defaults");
    }

    pub fn list(ledger: &Ledger) -> &[Category] {
        &ledger.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::category::{CategoryIcon, CategoryKind, SAVINGS_CATEGORY_ID};
    use crate::ledger::transaction::{Transaction, TransactionDraft, TransactionKind};
    use chrono::NaiveDate;

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft::new(name, CategoryIcon::Car, "#34D399", CategoryKind::Expense)
    }

    fn expense_in(category_id: Uuid) -> Transaction {
        Transaction::from_draft(TransactionDraft::new(
            "entry",
            -5.0,
            category_id,
            NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid test date"),
            TransactionKind::Expense,
        ))
    }

    #[test]
    fn protected_categories_cannot_be_deleted() {
        let mut ledger = Ledger::new();
        for id in [OTHER_CATEGORY_ID, SAVINGS_CATEGORY_ID] {
            let err = CategoryService::delete(&mut ledger, id).expect_err("must refuse");
            assert!(matches!(err, TrackerError::ProtectedCategory(_)));
        }
        assert_eq!(ledger.categories.len(), 10);
    }

    #[test]
    fn delete_reassigns_transactions_to_other() {
        let mut ledger = Ledger::new();
        let id = CategoryService::add(&mut ledger, draft("Pets")).expect("add category");
        ledger.push_transaction(expense_in(id));
        ledger.push_transaction(expense_in(id));

        CategoryService::delete(&mut ledger, id).expect("delete category");
        assert!(!ledger.contains_category(id));
        assert!(ledger
            .transactions
            .iter()
            .all(|t| t.category_id == OTHER_CATEGORY_ID));
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut ledger = Ledger::new();
        CategoryService::delete(&mut ledger, Uuid::new_v4()).expect("no-op delete");
        assert_eq!(ledger.categories.len(), 10);
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut ledger = Ledger::new();
        let err = CategoryService::add(&mut ledger, draft("   ")).expect_err("must reject");
        assert!(matches!(err, TrackerError::InvalidInput(_)));

        let mut existing = ledger.categories[0].clone();
        existing.name = String::new();
        let err = CategoryService::update(&mut ledger, existing).expect_err("must reject");
        assert!(matches!(err, TrackerError::InvalidInput(_)));
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut ledger = Ledger::new();
        let stray = Category::from_draft(draft("Stray"));
        let replaced = CategoryService::update(&mut ledger, stray).expect("update runs");
        assert!(!replaced);
        assert_eq!(ledger.categories.len(), 10);
    }

    #[test]
    fn protected_categories_accept_edits() {
        let mut ledger = Ledger::new();
        let mut other = ledger
            .category(OTHER_CATEGORY_ID)
            .expect("default Other")
            .clone();
        other.name = "Misc".into();
        assert!(CategoryService::update(&mut ledger, other).expect("update runs"));
        assert_eq!(
            ledger.category(OTHER_CATEGORY_ID).expect("still there").name,
            "Misc"
        );
    }

    #[test]
    fn reset_restores_defaults_and_is_idempotent() {
        let mut ledger = Ledger::new();
        let custom = CategoryService::add(&mut ledger, draft("Pets")).expect("add category");
        ledger.push_transaction(expense_in(custom));

        CategoryService::reset_to_defaults(&mut ledger);
        assert_eq!(ledger.categories.len(), 10);
        assert!(!ledger.contains_category(custom));
        // The orphaned entry keeps its reference; reads treat it as missing.
        assert_eq!(ledger.transactions[0].category_id, custom);

        CategoryService::reset_to_defaults(&mut ledger);
        assert_eq!(ledger.categories.len(), 10);
    }
}

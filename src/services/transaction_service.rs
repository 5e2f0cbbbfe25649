use uuid::Uuid;

use crate::errors::{Result, TrackerError};
use crate::ledger::category::Category;
use crate::ledger::recurring::expand_monthly;
use crate::ledger::transaction::{Transaction, TransactionDraft};
use crate::ledger::Ledger;

/// Records, edits, and removes ledger entries while upholding the sign and
/// category invariants.
pub struct TransactionService;

impl TransactionService {
    /// Validates and records a single entry, returning its assigned id.
    pub fn add(ledger: &mut Ledger, draft: TransactionDraft) -> Result<Uuid> {
        let draft = Self::validate(ledger, draft)?;
        let id = ledger.push_transaction(Transaction::from_draft(draft));
        ledger.sort_transactions();
        tracing::debug!(%id, "transaction recorded");
        Ok(id)
    }

    /// Expands `template` into one entry per month and records them all.
    ///
    /// The template is validated once; every expanded instance shares its
    /// category, amount, and kind, so they cannot fail individually.
    pub fn add_recurring(
        ledger: &mut Ledger,
        template: TransactionDraft,
        months: u32,
    ) -> Result<Vec<Uuid>> {
        if months == 0 {
            return Err(TrackerError::InvalidInput(
                "recurring transactions need at least one month".into(),
            ));
        }
        let template = Self::validate(ledger, template)?;
        let ids: Vec<Uuid> = expand_monthly(&template, months)
            .into_iter()
            .map(|draft| ledger.push_transaction(Transaction::from_draft(draft)))
            .collect();
        ledger.sort_transactions();
        tracing::debug!(count = ids.len(), "recurring transactions recorded");
        Ok(ids)
    }

    /// Replaces the stored entry sharing `transaction.id`.
    ///
    /// Unknown ids are a no-op; the update never inserts.
    pub fn update(ledger: &mut Ledger, mut transaction: Transaction) -> Result<bool> {
        if !ledger.contains_category(transaction.category_id) {
            return Err(TrackerError::UnknownCategory(transaction.category_id));
        }
        if !transaction.kind.matches_sign(transaction.amount) {
            return Err(TrackerError::InvalidInput(format!(
                "amount {} does not match a {} entry",
                transaction.amount, transaction.kind
            )));
        }
        let trimmed = transaction.title.trim();
        transaction.title = if trimmed.is_empty() {
            transaction.kind.placeholder_title().to_string()
        } else {
            trimmed.to_string()
        };

        let replaced = ledger.replace_transaction(transaction);
        if replaced {
            ledger.sort_transactions();
        } else {
            tracing::debug!("update targeted an unknown transaction id");
        }
        Ok(replaced)
    }

    /// Removes an entry by id, returning it when it existed.
    pub fn delete(ledger: &mut Ledger, id: Uuid) -> Option<Transaction> {
        let removed = ledger.remove_transaction(id);
        if removed.is_none() {
            tracing::debug!(%id, "delete targeted an unknown transaction id");
        }
        removed
    }

    /// Wipes every transaction and restores the default category set.
    ///
    /// The monthly limit survives a clear.
    pub fn clear(ledger: &mut Ledger) {
        ledger.transactions.clear();
        ledger.categories = Category::defaults();
        ledger.touch();
        tracing::info!("ledger data cleared");
    }

    pub fn list(ledger: &Ledger) -> &[Transaction] {
        &ledger.transactions
    }

    fn validate(ledger: &Ledger, mut draft: TransactionDraft) -> Result<TransactionDraft> {
        if !ledger.contains_category(draft.category_id) {
            return Err(TrackerError::UnknownCategory(draft.category_id));
        }
        if !draft.kind.matches_sign(draft.amount) {
            return Err(TrackerError::InvalidInput(format!(
                "amount {} does not match a {} entry",
                draft.amount, draft.kind
            )));
        }
        let trimmed = draft.title.trim();
        draft.title = if trimmed.is_empty() {
            draft.kind.placeholder_title().to_string()
        } else {
            trimmed.to_string()
        };
        Ok(draft)
    }
}

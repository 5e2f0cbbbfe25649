use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single dated ledger entry.
///
/// Negative amounts denote money leaving the ledger, non-negative amounts
/// money entering it; `kind` carries the matching classification for
/// aggregation and display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category_id: Uuid,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Materializes a draft with a freshly assigned id.
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            amount: draft.amount,
            category_id: draft.category_id,
            date: draft.date,
            kind: draft.kind,
        }
    }
}

/// Classification tag expected to agree with the amount sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    /// Title used when a draft arrives with an empty label.
    pub fn placeholder_title(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        }
    }

    /// Whether `amount` carries the sign this kind requires.
    pub fn matches_sign(self, amount: f64) -> bool {
        match self {
            TransactionKind::Expense => amount < 0.0,
            TransactionKind::Income => amount >= 0.0,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Expense => write!(f, "expense"),
            TransactionKind::Income => write!(f, "income"),
        }
    }
}

/// Id-less template accepted by the creation commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: f64,
    pub category_id: Uuid,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

impl TransactionDraft {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category_id: Uuid,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            category_id,
            date,
            kind,
        }
    }
}

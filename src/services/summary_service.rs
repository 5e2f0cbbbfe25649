use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{Result, TrackerError};
use crate::ledger::category::SAVINGS_CATEGORY_ID;
use crate::ledger::date;
use crate::ledger::transaction::TransactionKind;
use crate::ledger::Ledger;

/// Running totals up to a reference date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub balance: f64,
}

/// One category's share of a period's spending.
#[derive(Debug, Clone)]
pub struct BreakdownEntry {
    pub category_id: Uuid,
    pub name: String,
    pub icon: crate::ledger::category::CategoryIcon,
    pub color: String,
    pub total: f64,
}

/// Per-category spending over a period, with savings reported separately.
#[derive(Debug, Clone)]
pub struct Breakdown {
    pub entries: Vec<BreakdownEntry>,
    pub savings: f64,
}

/// Read-only aggregation over the ledger.
pub struct SummaryService;

impl SummaryService {
    /// Income, expense, savings, and balance totals up to `as_of` inclusive.
    ///
    /// Each entry lands in exactly one bucket: income first, then savings for
    /// anything in the Savings category, then expenses.
    pub fn totals(ledger: &Ledger, as_of: NaiveDate) -> Totals {
        let mut income = 0.0;
        let mut expenses = 0.0;
        let mut savings = 0.0;
        for txn in ledger
            .transactions
            .iter()
            .filter(|txn| date::on_or_before(txn.date, as_of))
        {
            if txn.kind == TransactionKind::Income {
                income += txn.amount;
            } else if txn.category_id == SAVINGS_CATEGORY_ID {
                savings += txn.amount.abs();
            } else {
                expenses += txn.amount.abs();
            }
        }
        Totals {
            income,
            expenses,
            savings,
            balance: income - expenses - savings,
        }
    }

    /// Spending inside the month of `month_ref`, savings excluded.
    pub fn monthly_expenses(ledger: &Ledger, month_ref: NaiveDate) -> f64 {
        ledger
            .transactions
            .iter()
            .filter(|txn| {
                txn.kind == TransactionKind::Expense
                    && txn.category_id != SAVINGS_CATEGORY_ID
                    && date::same_month(txn.date, month_ref)
            })
            .map(|txn| txn.amount.abs())
            .sum()
    }

    /// Per-category expense totals for the inclusive `[start, end]` period,
    /// sorted by descending total. Categories without spending are omitted.
    pub fn category_breakdown(
        ledger: &Ledger,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Breakdown> {
        if start > end {
            return Err(TrackerError::InvalidInput(format!(
                "period start {start} lies after its end {end}"
            )));
        }

        let in_period = |date: NaiveDate| -> bool { date >= start && date <= end };

        let mut entries = Vec::new();
        for category in &ledger.categories {
            if category.id == SAVINGS_CATEGORY_ID {
                continue;
            }
            let total: f64 = ledger
                .transactions
                .iter()
                .filter(|txn| {
                    txn.category_id == category.id
                        && txn.kind == TransactionKind::Expense
                        && in_period(txn.date)
                })
                .map(|txn| txn.amount.abs())
                .sum();
            if total > 0.0 {
                entries.push(BreakdownEntry {
                    category_id: category.id,
                    name: category.name.clone(),
                    icon: category.icon,
                    color: category.color.clone(),
                    total,
                });
            }
        }
        entries.sort_by(|a, b| b.total.total_cmp(&a.total));

        let savings = ledger
            .transactions
            .iter()
            .filter(|txn| txn.category_id == SAVINGS_CATEGORY_ID && in_period(txn.date))
            .map(|txn| txn.amount.abs())
            .sum();

        Ok(Breakdown { entries, savings })
    }
}

use chrono::NaiveDate;

use crate::errors::{Result, TrackerError};
use crate::ledger::date;
use crate::ledger::Ledger;

use super::summary_service::SummaryService;

/// Where a month's spending stands against the configured limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyBudgetStatus {
    /// First day of the month the status covers.
    pub month: NaiveDate,
    pub spent: f64,
    pub limit: f64,
    /// Fraction of the limit consumed, clamped to `0.0..=1.0`.
    pub progress: f64,
    pub exceeded: bool,
}

/// Maintains the monthly spending limit and reports progress against it.
pub struct BudgetService;

impl BudgetService {
    pub fn set_monthly_limit(ledger: &mut Ledger, value: f64) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(TrackerError::InvalidInput(format!(
                "monthly limit must be a positive amount, got {value}"
            )));
        }
        ledger.monthly_limit = value;
        ledger.touch();
        tracing::debug!(limit = value, "monthly limit updated");
        Ok(())
    }

    /// Spending against the limit for the month containing `as_of`.
    pub fn monthly_status(ledger: &Ledger, as_of: NaiveDate) -> Result<MonthlyBudgetStatus> {
        let limit = ledger.monthly_limit;
        if !limit.is_finite() || limit <= 0.0 {
            return Err(TrackerError::InvalidInput(format!(
                "stored monthly limit {limit} is not usable"
            )));
        }
        let spent = SummaryService::monthly_expenses(ledger, as_of);
        let (month, _) = date::month_bounds(as_of);
        Ok(MonthlyBudgetStatus {
            month,
            spent,
            limit,
            progress: (spent / limit).clamp(0.0, 1.0),
            exceeded: spent > limit,
        })
    }
}

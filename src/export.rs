//! CSV export of the transaction history.

use std::io::Write;

use crate::errors::{Result, TrackerError};
use crate::ledger::date::format_day_month_year;
use crate::ledger::transaction::Transaction;

/// Writes transactions as CSV with a `Date,Title,Amount,Type` header.
///
/// Rows follow the order of `transactions`, so the newest-first ledger
/// ordering carries over to the file.
pub fn write_csv<W: Write>(transactions: &[Transaction], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Date", "Title", "Amount", "Type"])?;
    for txn in transactions {
        writer.write_record([
            format_day_month_year(txn.date),
            txn.title.clone(),
            txn.amount.to_string(),
            txn.kind.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn csv_string(transactions: &[Transaction]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(transactions, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| TrackerError::Storage(format!("csv export produced invalid utf-8: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::category::OTHER_CATEGORY_ID;
    use crate::ledger::transaction::{TransactionDraft, TransactionKind};
    use chrono::NaiveDate;

    fn entry(title: &str, amount: f64, day: u32, kind: TransactionKind) -> Transaction {
        Transaction::from_draft(TransactionDraft::new(
            title,
            amount,
            OTHER_CATEGORY_ID,
            NaiveDate::from_ymd_opt(2024, 3, day).expect("valid test date"),
            kind,
        ))
    }

    #[test]
    fn export_matches_the_documented_layout() {
        let transactions = vec![
            entry("Groceries", -42.5, 5, TransactionKind::Expense),
            entry("Salary", 1800.0, 1, TransactionKind::Income),
        ];
        let output = csv_string(&transactions).expect("csv export");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "Date,Title,Amount,Type",
                "05/03/2024,Groceries,-42.5,expense",
                "01/03/2024,Salary,1800,income",
            ]
        );
    }

    #[test]
    fn titles_with_commas_are_quoted() {
        let transactions = vec![entry("Dinner, drinks", -60.0, 9, TransactionKind::Expense)];
        let output = csv_string(&transactions).expect("csv export");
        assert!(output.contains("\"Dinner, drinks\""));
    }

    #[test]
    fn empty_history_still_writes_the_header() {
        let output = csv_string(&[]).expect("csv export");
        assert_eq!(output, "Date,Title,Amount,Type\n");
    }
}

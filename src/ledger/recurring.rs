//! Expansion of a recurring intent into per-month transaction drafts.

use super::date;
use super::transaction::TransactionDraft;

/// Expands `template` into one draft per consecutive calendar month.
///
/// Each instance keeps the template's day-of-month, falling back to the
/// target month's last day when the month is shorter; months after a
/// clamped one recover the original day. Titles carry an "(i/N)" position
/// suffix when more than one instance is produced.
pub fn expand_monthly(template: &TransactionDraft, months: u32) -> Vec<TransactionDraft> {
    (0..months)
        .map(|offset| {
            let mut draft = template.clone();
            draft.date = date::shift_month(template.date, offset as i32);
            if months > 1 {
                draft.title = format!("{} ({}/{})", template.title, offset + 1, months);
            }
            draft
        })
        .collect()
}

//! Reply formatting helpers.
//!
//! Amounts are rendered with thousands separators; dates as ISO days. Any
//! locale-specific presentation (currency words, alternative calendars)
//! belongs to the messaging front end, not here.

use crate::entities::{DebtModel, TransactionModel, transaction::TransactionKind};

/// Formats an amount in the smallest currency unit with thousands separators,
/// as in `1,234,567` or `-500`.
#[must_use]
pub fn format_amount(amount: i64) -> String {
    let digits: Vec<char> = amount.unsigned_abs().to_string().chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (index, ch) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// One-line rendering of a transaction, as shown under the summary:
/// `#2 💸 1,200 - groceries (2026-08-06)`.
#[must_use]
pub fn format_transaction_line(transaction: &TransactionModel) -> String {
    let marker = match transaction.kind {
        TransactionKind::Income => "💰",
        TransactionKind::Expense => "💸",
    };
    format!(
        "#{} {} {}{} ({})",
        transaction.id,
        marker,
        format_amount(transaction.amount),
        format_note(transaction.description.as_deref()),
        transaction.created_at.format("%Y-%m-%d")
    )
}

/// One-line rendering of a debt:
/// `[a34] Dana owes 10,000 - lunch (2026-08-06)`.
#[must_use]
pub fn format_debt_line(debt: &DebtModel) -> String {
    format!(
        "[{}] {} owes {}{} ({})",
        debt.code,
        debt.debtor_name,
        format_amount(debt.amount),
        format_note(debt.description.as_deref()),
        debt.created_at.format("%Y-%m-%d")
    )
}

/// ` - note` when a description is present, empty otherwise.
#[must_use]
pub fn format_note(description: Option<&str>) -> String {
    description.map(|d| format!(" - {d}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(7), "7");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(12_345), "12,345");
        assert_eq!(format_amount(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-500), "-500");
        assert_eq!(format_amount(-3800), "-3,800");
    }

    #[test]
    fn test_format_note() {
        assert_eq!(format_note(None), "");
        assert_eq!(format_note(Some("salary")), " - salary");
    }
}

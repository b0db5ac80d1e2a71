//! Core business logic - framework-agnostic ledger, debt book, and
//! authorization policy. All functions here return structured data that the
//! command layer formats for the user.

pub mod debts;
pub mod ledger;
pub mod policy;

pub use debts::DebtBook;
pub use ledger::{LedgerStore, Summary, TransactionPatch};
pub use policy::{AdminOnly, AuthorizationPolicy};

use crate::errors::{Error, MAX_DESCRIPTION_LEN, Result};

/// Amounts are carried in the smallest currency unit; zero and negative
/// values are rejected everywhere, direction lives in the transaction kind.
pub(crate) fn validate_amount(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

pub(crate) fn validate_description(description: Option<&str>) -> Result<()> {
    if let Some(text) = description {
        let len = text.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(Error::DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount_accepts_positive() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(i64::MAX).is_ok());
    }

    #[test]
    fn test_validate_amount_rejects_zero_and_negative() {
        assert!(matches!(
            validate_amount(0),
            Err(Error::InvalidAmount { amount: 0 })
        ));
        assert!(matches!(
            validate_amount(-500),
            Err(Error::InvalidAmount { amount: -500 })
        ));
    }

    #[test]
    fn test_validate_description_bounds() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("groceries")).is_ok());

        let at_limit = "x".repeat(MAX_DESCRIPTION_LEN);
        assert!(validate_description(Some(&at_limit)).is_ok());

        let over_limit = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            validate_description(Some(&over_limit)),
            Err(Error::DescriptionTooLong { .. })
        ));
    }
}

//! Debt book - money owed to a user by named third parties.
//!
//! Debts are referenced by a short code (one lowercase letter plus two digits,
//! as in `a34`) instead of a row id, and every operation is scoped to the user
//! the debt is owed to. Codes are assigned by a deterministic probe over the
//! code space; the unique column constraint backstops concurrent inserts.

use crate::{
    core::{validate_amount, validate_description},
    entities::{Debt, debt},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, PaginatorTrait, QueryOrder, Set, TransactionTrait,
    prelude::*,
};
use tracing::info;

/// Number of distinct short codes: 26 letters x two digits from 1-9.
const CODE_SPACE: u64 = 26 * 81;

/// Durable storage for per-user debt records.
pub struct DebtBook {
    db: DatabaseConnection,
}

impl DebtBook {
    /// Creates a debt book over `db`.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a debt owed to `user_id` and returns the persisted row with
    /// its assigned code.
    pub async fn add(
        &self,
        user_id: i64,
        debtor_name: &str,
        amount: i64,
        description: Option<String>,
    ) -> Result<debt::Model> {
        let debtor_name = debtor_name.trim();
        if debtor_name.is_empty() {
            return Err(Error::InvalidDebtorName);
        }
        validate_amount(amount)?;
        validate_description(description.as_deref())?;

        let txn = self.db.begin().await?;
        let code = next_free_code(&txn).await?;

        let model = debt::ActiveModel {
            code: Set(code),
            debtor_name: Set(debtor_name.to_string()),
            amount: Set(amount),
            description: Set(description),
            created_at: Set(Utc::now()),
            user_id: Set(user_id),
            ..Default::default()
        };

        let recorded = model.insert(&txn).await?;
        txn.commit().await?;

        info!(
            code = %recorded.code,
            user_id,
            amount,
            "recorded debt"
        );
        Ok(recorded)
    }

    /// Returns all debts owed to `user_id`, oldest first.
    pub async fn list(&self, user_id: i64) -> Result<Vec<debt::Model>> {
        Debt::find()
            .filter(debt::Column::UserId.eq(user_id))
            .order_by_asc(debt::Column::CreatedAt)
            .order_by_asc(debt::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Settles (removes) the debt with `code` owed to `user_id` and returns
    /// the removed record. Another user's codes are invisible here.
    pub async fn settle(&self, user_id: i64, code: &str) -> Result<debt::Model> {
        let txn = self.db.begin().await?;
        let existing = Debt::find()
            .filter(debt::Column::Code.eq(code))
            .filter(debt::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| Error::DebtNotFound {
                code: code.to_string(),
            })?;

        existing.clone().delete(&txn).await?;
        txn.commit().await?;

        info!(code = %existing.code, user_id, "settled debt");
        Ok(existing)
    }
}

/// Maps a probe seed to a code: letter from `seed % 26`, digits 1-9 from the
/// remaining factor. Injective over one pass of the code space.
fn candidate_code(seed: u64) -> String {
    let letter = char::from(b'a' + u8::try_from(seed % 26).unwrap_or(0));
    let rest = (seed / 26) % 81;
    let first_digit = rest / 9 + 1;
    let second_digit = rest % 9 + 1;
    format!("{letter}{first_digit}{second_digit}")
}

/// Probes for an unused code starting from the current table size, wrapping
/// over the whole space before giving up.
async fn next_free_code<C: ConnectionTrait>(conn: &C) -> Result<String> {
    let start = Debt::find().count(conn).await?;

    for attempt in 0..CODE_SPACE {
        let code = candidate_code((start + attempt) % CODE_SPACE);
        let taken = Debt::find()
            .filter(debt::Column::Code.eq(code.as_str()))
            .count(conn)
            .await?
            > 0;
        if !taken {
            return Ok(code);
        }
    }

    Err(Error::DebtCodesExhausted)
}

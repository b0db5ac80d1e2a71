//! Ledger store - durable, validated storage for income/expense transactions.
//!
//! This is the single source of truth for balances. The store is constructed
//! once per process with a database handle and an authorization policy, and
//! every operation validates its input before touching storage. Mutations of
//! existing rows (edit, delete) are policy-gated and run as storage-level
//! transactions, so concurrent mutations of the same row serialize and the
//! final state is always one submitted version in full.

use crate::{
    core::policy::AuthorizationPolicy,
    core::{validate_amount, validate_description},
    entities::{Transaction, transaction, transaction::TransactionKind},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, QueryOrder, QuerySelect, Set, TransactionTrait,
    prelude::*,
};
use std::sync::Arc;
use tracing::info;

/// Aggregated totals for one user, taken from a single consistent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Sum of all income amounts.
    pub total_income: i64,
    /// Sum of all expense amounts.
    pub total_expense: i64,
    /// `total_income - total_expense`.
    pub net_balance: i64,
}

/// Fields an administrator may change on a recorded transaction. Unset fields
/// are left untouched; a patch with no fields set is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    /// New amount, validated like a fresh record.
    pub amount: Option<i64>,
    /// New direction for the entry.
    pub kind: Option<TransactionKind>,
    /// New description, validated against the length bound.
    pub description: Option<String>,
}

impl TransactionPatch {
    fn validate(&self) -> Result<()> {
        if self.amount.is_none() && self.kind.is_none() && self.description.is_none() {
            return Err(Error::EmptyPatch);
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        validate_description(self.description.as_deref())
    }
}

/// Durable, validated storage and retrieval of transactions.
pub struct LedgerStore {
    db: DatabaseConnection,
    policy: Arc<dyn AuthorizationPolicy>,
}

impl LedgerStore {
    /// Creates a store over `db`, gating mutations through `policy`.
    #[must_use]
    pub fn new(db: DatabaseConnection, policy: Arc<dyn AuthorizationPolicy>) -> Self {
        Self { db, policy }
    }

    /// Records a new transaction for `user_id` and returns the persisted row.
    ///
    /// Fails with `Error::InvalidAmount` unless `amount` is positive, and with
    /// `Error::DescriptionTooLong` when the note exceeds the length bound.
    pub async fn record(
        &self,
        user_id: i64,
        kind: TransactionKind,
        amount: i64,
        description: Option<String>,
    ) -> Result<transaction::Model> {
        validate_amount(amount)?;
        validate_description(description.as_deref())?;

        let now = Utc::now();
        let model = transaction::ActiveModel {
            user_id: Set(user_id),
            kind: Set(kind),
            amount: Set(amount),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let recorded = model.insert(&self.db).await?;
        info!(
            id = recorded.id,
            user_id,
            kind = ?kind,
            amount,
            "recorded transaction"
        );
        Ok(recorded)
    }

    /// Aggregates all of `user_id`'s transactions into income/expense totals.
    ///
    /// Both sums run inside one storage transaction so the buckets reflect the
    /// same committed snapshot; a user with no rows gets all zeros.
    pub async fn summary(&self, user_id: i64) -> Result<Summary> {
        let txn = self.db.begin().await?;
        let total_income = sum_amounts(&txn, user_id, TransactionKind::Income).await?;
        let total_expense = sum_amounts(&txn, user_id, TransactionKind::Expense).await?;
        txn.commit().await?;

        Ok(Summary {
            total_income,
            total_expense,
            net_balance: total_income - total_expense,
        })
    }

    /// Returns up to `limit` of `user_id`'s transactions, newest first.
    pub async fn recent(&self, user_id: i64, limit: u64) -> Result<Vec<transaction::Model>> {
        Transaction::find()
            .filter(transaction::Column::UserId.eq(user_id))
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Applies `patch` to an existing transaction and returns the updated row.
    ///
    /// The requester must pass the authorization policy; the patch is
    /// revalidated like a fresh record; `updated_at` is bumped. The
    /// read-modify-write runs inside one storage transaction, which serializes
    /// concurrent edits of the same id.
    pub async fn edit(
        &self,
        requester_id: i64,
        transaction_id: i64,
        patch: TransactionPatch,
    ) -> Result<transaction::Model> {
        self.policy.authorize_mutation(requester_id)?;
        patch.validate()?;

        let txn = self.db.begin().await?;
        let existing = Transaction::find_by_id(transaction_id)
            .one(&txn)
            .await?
            .ok_or(Error::TransactionNotFound { id: transaction_id })?;

        let mut active: transaction::ActiveModel = existing.into();
        if let Some(amount) = patch.amount {
            active.amount = Set(amount);
        }
        if let Some(kind) = patch.kind {
            active.kind = Set(kind);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(id = updated.id, requester_id, "edited transaction");
        Ok(updated)
    }

    /// Deletes one transaction and returns the removed row.
    ///
    /// Deletion is an explicit, policy-gated operation, never a side effect
    /// of edit.
    pub async fn delete(&self, requester_id: i64, transaction_id: i64) -> Result<transaction::Model> {
        self.policy.authorize_mutation(requester_id)?;

        let txn = self.db.begin().await?;
        let existing = Transaction::find_by_id(transaction_id)
            .one(&txn)
            .await?
            .ok_or(Error::TransactionNotFound { id: transaction_id })?;

        existing.clone().delete(&txn).await?;
        txn.commit().await?;

        info!(id = existing.id, requester_id, "deleted transaction");
        Ok(existing)
    }

    /// Deletes every transaction in the ledger and returns the count removed.
    pub async fn delete_all(&self, requester_id: i64) -> Result<u64> {
        self.policy.authorize_mutation(requester_id)?;

        let result = Transaction::delete_many().exec(&self.db).await?;
        info!(
            removed = result.rows_affected,
            requester_id, "purged all transactions"
        );
        Ok(result.rows_affected)
    }
}

/// SUM of one user's amounts for one kind; NULL (no rows) maps to zero.
async fn sum_amounts<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    kind: TransactionKind,
) -> Result<i64> {
    let total: Option<Option<i64>> = Transaction::find()
        .select_only()
        .column_as(transaction::Column::Amount.sum(), "total")
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::Kind.eq(kind))
        .into_tuple()
        .one(conn)
        .await?;

    Ok(total.flatten().unwrap_or(0))
}

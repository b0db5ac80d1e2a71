//! Transaction entity - one recorded income or expense event.
//!
//! Amounts are stored in the smallest currency unit and are always positive;
//! direction is carried by [`TransactionKind`]. `created_at` is immutable,
//! `updated_at` is bumped on every edit. Backticks are used for field names to
//! enable proper documentation linking.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier, monotonically assigned and never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Chat user ID that created and owns the record
    pub user_id: i64,
    /// Whether this entry is income or an expense
    pub kind: TransactionKind,
    /// Amount in the smallest currency unit, always positive
    pub amount: i64,
    /// Optional free-text note, bounded length
    pub description: Option<String>,
    /// When the transaction was recorded
    pub created_at: DateTimeUtc,
    /// When the transaction was last edited; equals `created_at` until then
    pub updated_at: DateTimeUtc,
}

/// Direction of a ledger entry. Stored as a short string in the database.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionKind {
    /// Money coming in
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Transactions reference no other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Debt entity - money owed to a user by a named third party.
//!
//! Debts are referenced in commands by a short unique `code` (one lowercase
//! letter followed by two digits) rather than by row id, and every query is
//! scoped to the `user_id` the debt is owed to.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debt database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    /// Unique identifier for the debt record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short unique code used to reference the debt in commands
    #[sea_orm(unique)]
    pub code: String,
    /// Name of the person who owes the money
    pub debtor_name: String,
    /// Amount owed, in the smallest currency unit, always positive
    pub amount: i64,
    /// Optional free-text note, bounded length
    pub description: Option<String>,
    /// When the debt was recorded
    pub created_at: DateTimeUtc,
    /// Chat user ID the debt is owed to
    pub user_id: i64,
}

/// Debts reference no other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

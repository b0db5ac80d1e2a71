//! Unified error types for the ledger core.
//!
//! Every failure surfaces as a distinct variant so the front end can produce a
//! specific user-facing message: validation (`InvalidAmount`,
//! `DescriptionTooLong`, `EmptyPatch`, `InvalidDebtorName`), authorization
//! (`Unauthorized`), lookups (`TransactionNotFound`, `DebtNotFound`), and
//! storage-engine failures (`Storage`). Nothing is retried internally.

use thiserror::Error;

/// Maximum accepted length for a transaction or debt description.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// All errors the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Amounts are carried in the smallest currency unit and must be positive;
    /// direction is expressed by the transaction kind, never by sign.
    #[error("invalid amount {amount}: must be a positive number")]
    InvalidAmount {
        /// The rejected amount.
        amount: i64,
    },

    /// Description exceeded [`MAX_DESCRIPTION_LEN`].
    #[error("description is {len} characters long (limit {max})")]
    DescriptionTooLong {
        /// Length of the rejected description.
        len: usize,
        /// The configured limit.
        max: usize,
    },

    /// An edit request that names no fields to change.
    #[error("nothing to update: specify at least one of amount, kind, description")]
    EmptyPatch,

    /// Debtor names must be non-empty.
    #[error("debtor name must not be empty")]
    InvalidDebtorName,

    /// The requester is not allowed to mutate existing ledger rows.
    #[error("user {user_id} is not authorized to modify recorded transactions")]
    Unauthorized {
        /// Identity of the rejected requester.
        user_id: i64,
    },

    /// No transaction with the given id exists.
    #[error("transaction {id} not found")]
    TransactionNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// No debt with the given code exists for the requesting user.
    #[error("debt '{code}' not found")]
    DebtNotFound {
        /// The code that was looked up.
        code: String,
    },

    /// The short-code space for debts is exhausted.
    #[error("no free debt code available")]
    DebtCodesExhausted,

    /// A line could not be parsed into a command.
    #[error("could not parse command: {message}")]
    BadCommand {
        /// Human-readable description of the parse failure.
        message: String,
    },

    /// Configuration file or environment problems.
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration failure.
        message: String,
    },

    /// Storage-engine failure. Fatal for the triggering call, not the process.
    #[error("database error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    /// I/O error from the console loop.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

//! Shared test utilities for `tallybot`.
//!
//! This module provides common helper functions for setting up in-memory test
//! databases and constructing stores with a fixed administrator identity.

use crate::{
    core::{AdminOnly, DebtBook, LedgerStore},
    errors::Result,
};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The administrator identity every test store is built with.
pub const ADMIN_USER_ID: i64 = 42;

/// Hands out process-unique names for shared in-memory databases so parallel
/// tests never observe one another's rows.
static DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Builds a URL for a uniquely-named in-memory database using SQLite's shared
/// cache. Unlike a bare `sqlite::memory:`, several connections to this URL see
/// the same database, which lets a test hold a handle while a store holds
/// another. The `mock` feature removes `DatabaseConnection: Clone`, so sharing
/// a single handle by cloning is not available under the test build.
fn shared_memory_url() -> String {
    let seq = DB_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("sqlite:file:tallybot_test_{seq}?mode=memory&cache=shared")
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a ledger store over `db` with the fixed test administrator.
pub fn ledger_with_admin(db: DatabaseConnection) -> LedgerStore {
    LedgerStore::new(db, Arc::new(AdminOnly::new(ADMIN_USER_ID)))
}

/// Sets up a fresh database plus a ledger store over it. The returned
/// connection and the store share the same database, so a test can inspect
/// rows the store wrote.
pub async fn setup_ledger() -> Result<(DatabaseConnection, LedgerStore)> {
    let url = shared_memory_url();
    let db = Database::connect(&url).await?;
    crate::config::database::create_tables(&db).await?;
    let store = ledger_with_admin(Database::connect(&url).await?);
    Ok((db, store))
}

/// Sets up a fresh database plus both stores, for command-layer tests. Both
/// stores share the same database.
pub async fn setup_stores() -> Result<(LedgerStore, DebtBook)> {
    let url = shared_memory_url();
    let db = Database::connect(&url).await?;
    crate::config::database::create_tables(&db).await?;
    let ledger = ledger_with_admin(Database::connect(&url).await?);
    let debts = DebtBook::new(db);
    Ok((ledger, debts))
}

//! Database connection and table creation using `SeaORM`.
//!
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL. Creation is idempotent so
//! the console can be restarted against an existing database file.

use crate::entities::{Debt, Transaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database named by `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `transactions` and `debts` tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut transaction_table = schema.create_table_from_entity(Transaction);
    let mut debt_table = schema.create_table_from_entity(Debt);

    db.execute(builder.build(transaction_table.if_not_exists()))
        .await?;
    db.execute(builder.build(debt_table.if_not_exists())).await?;

    Ok(())
}

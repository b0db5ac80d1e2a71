//! Operator console for the `tallybot` ledger core.
//!
//! Wires configuration, storage, and the command layer together, then reads
//! commands line by line from stdin. The console stands in for the messaging
//! front end: every command is tagged with one configured user identity
//! (`TALLY_USER_ID`, defaulting to the administrator).

use std::io::BufRead;
use std::{env, io, sync::Arc};

use dotenvy::dotenv;
use tallybot::commands;
use tallybot::config;
use tallybot::core::{AdminOnly, DebtBook, LedgerStore};
use tallybot::errors::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Resolve the application configuration
    let app_config = config::load_app_configuration()?;
    info!(admin_user_id = app_config.admin_user_id, "configuration loaded");

    // 4. Initialize the database
    let db = config::database::create_connection(&app_config.database_url).await?;
    config::database::create_tables(&db).await?;
    info!(database_url = %app_config.database_url, "database initialized");

    // 5. Construct the stores
    let policy = Arc::new(AdminOnly::new(app_config.admin_user_id));
    // In the default build `DatabaseConnection` is `Clone`, so both stores
    // share one connection pool over the same database. The crate's tests
    // enable sea-orm's `mock` feature, which (via Cargo feature unification)
    // removes that `Clone` impl when this binary is compiled as a test target;
    // `main` never runs there, so an independent handle is sufficient to keep
    // the test build compiling.
    #[cfg(not(test))]
    let ledger = LedgerStore::new(db.clone(), policy);
    #[cfg(test)]
    let ledger = LedgerStore::new(
        config::database::create_connection(&app_config.database_url).await?,
        policy,
    );
    let debts = DebtBook::new(db);

    // 6. Run the console loop. TALLY_USER_ID is read here, directly before
    // use, not stored in AppConfig.
    let user_id = env::var("TALLY_USER_ID")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(app_config.admin_user_id);
    info!(user_id, "console session started; type `help` for commands, `quit` to exit");

    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        let reply = match commands::parse(trimmed) {
            Ok(command) => commands::dispatch(&ledger, &debts, user_id, command).await,
            Err(error) => Err(error),
        };
        match reply {
            Ok(text) => println!("{text}"),
            Err(error) => println!("❌ {error}"),
        }
    }

    Ok(())
}

//! Bootstrap entry point for a local TaskDesk store.
//!
//! # Responsibility
//! - Open (or create) the database at the path given as the first
//!   argument, apply migrations, and seed the default accounts.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

use taskdesk_core::db::migrations::latest_version;
use taskdesk_core::db::open_db;
use taskdesk_core::{AccountService, SqliteUserRepository};

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "taskdesk.db".to_string());

    match bootstrap(&path) {
        Ok(()) => {
            println!(
                "taskdesk {} ready: db={path} schema=v{}",
                taskdesk_core::core_version(),
                latest_version()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("taskdesk bootstrap failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn bootstrap(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(path)?;
    let accounts = AccountService::new(SqliteUserRepository::try_new(&conn)?);
    accounts.seed_default_accounts()?;
    Ok(())
}

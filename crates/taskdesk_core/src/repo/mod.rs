//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories only accept migrated connections (`try_new` guards).
//! - Constraint violations are classified from SQLite extended result
//!   codes, never pre-checked with extra SELECTs.

use crate::db::DbError;
use crate::model::task::TaskId;
use crate::model::user::UserId;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod task_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for account/task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Unique constraint violation on `users.username`.
    DuplicateUsername(String),
    /// Primary key violation on `task_assignments` (duplicate pair).
    AlreadyAssigned { task_id: TaskId, user_id: UserId },
    /// A targeted row does not exist (zero rows changed).
    NotFound(Uuid),
    /// Foreign key violation: a referenced task or user does not exist.
    MissingReference,
    /// Persisted state failed domain parsing.
    InvalidData(String),
    /// The connection has not been migrated to the supported schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// The schema version matches but a required table is absent.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateUsername(username) => {
                write!(f, "username already exists: {username}")
            }
            Self::AlreadyAssigned { task_id, user_id } => {
                write!(f, "task {task_id} is already assigned to user {user_id}")
            }
            Self::NotFound(id) => write!(f, "row not found: {id}"),
            Self::MissingReference => {
                write!(f, "referenced task or user does not exist")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match supported {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that skipped `open_db` bootstrap.
pub(crate) fn ensure_schema_ready(
    conn: &Connection,
    required_table: &'static str,
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = crate::db::migrations::latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [required_table],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::MissingRequiredTable(required_table));
    }

    Ok(())
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

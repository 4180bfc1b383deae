//! Account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide account insert/lookup APIs over the `users` table.
//! - Classify username uniqueness violations as `DuplicateUsername`.
//!
//! # Invariants
//! - The password digest leaves this module only inside
//!   `StoredCredentials`, for verification; `UserRecord` never carries it.

use crate::model::user::{AccountDraft, Role, UserId, UserRecord};
use crate::repo::{
    ensure_schema_ready, is_unique_violation, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    username,
    email,
    role,
    created_at
FROM users";

/// Account row paired with its stored digest, for credential verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}

/// Repository interface for account persistence.
pub trait UserRepository {
    /// Inserts one account and returns its generated id.
    fn create_user(&self, draft: &AccountDraft, password_hash: &str) -> RepoResult<UserId>;
    /// Looks up one account (with digest) by unique username.
    fn find_by_username(&self, username: &str) -> RepoResult<Option<StoredCredentials>>;
    /// Looks up one account by id.
    fn get_user(&self, user_id: UserId) -> RepoResult<Option<UserRecord>>;
}

/// SQLite-backed account repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "users")?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, draft: &AccountDraft, password_hash: &str) -> RepoResult<UserId> {
        let user_id = Uuid::new_v4();
        let result = self.conn.execute(
            "INSERT INTO users (user_id, username, password_hash, email, role)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user_id.to_string(),
                draft.username.as_str(),
                password_hash,
                draft.email.as_str(),
                draft.role.as_db_str(),
            ],
        );

        match result {
            Ok(_) => Ok(user_id),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::DuplicateUsername(draft.username.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<StoredCredentials>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                user_id,
                username,
                email,
                role,
                created_at,
                password_hash
             FROM users
             WHERE username = ?1;",
        )?;

        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            let user = parse_user_row(row)?;
            let password_hash: String = row.get("password_hash")?;
            return Ok(Some(StoredCredentials {
                user,
                password_hash,
            }));
        }

        Ok(None)
    }

    fn get_user(&self, user_id: UserId) -> RepoResult<Option<UserRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;

        let mut rows = stmt.query([user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<UserRecord> {
    let id_text: String = row.get("user_id")?;
    let user_id = parse_uuid(&id_text, "users.user_id")?;

    let role_text: String = row.get("role")?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in users.role"))
    })?;

    Ok(UserRecord {
        user_id,
        username: row.get("username")?,
        email: row.get("email")?,
        role,
        created_at: row.get("created_at")?,
    })
}

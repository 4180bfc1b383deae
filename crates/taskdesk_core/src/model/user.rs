//! Account domain model.
//!
//! # Responsibility
//! - Define the role taxonomy and the account read/write shapes.
//!
//! # Invariants
//! - `username` is unique across the store.
//! - Role is immutable after account creation; there is no demotion path.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one account.
pub type UserId = Uuid;

/// Role attached to an account; selects the capability set at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    /// Stable store value, kept byte-identical to the original database
    /// contents for compatibility.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Employee => "Employee",
        }
    }

    /// Parses one role from its store value. Exact match only.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(Self::Admin),
            "Manager" => Some(Self::Manager),
            "Employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Account read model. Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Input shape for account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl AccountDraft {
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            role,
        }
    }

    /// Rejects blank identity fields before any SQL runs.
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.username.trim().is_empty() {
            return Err(AccountValidationError::BlankUsername);
        }
        if self.email.trim().is_empty() {
            return Err(AccountValidationError::BlankEmail);
        }
        Ok(())
    }
}

/// Validation failures for account input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountValidationError {
    BlankUsername,
    BlankEmail,
}

impl Display for AccountValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankUsername => write!(f, "username must not be blank"),
            Self::BlankEmail => write!(f, "email must not be blank"),
        }
    }
}

impl Error for AccountValidationError {}

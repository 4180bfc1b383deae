//! Account use-case service: login, logout, account creation, seeding.
//!
//! # Responsibility
//! - Verify credentials and open role-bound sessions.
//! - Gate account creation on the `create_account` capability.
//! - Seed the original bootstrap accounts on first run.
//!
//! # Invariants
//! - `login` returns the same failure for unknown usernames and wrong
//!   passwords; callers cannot enumerate accounts through it.
//! - Passwords and digests are never logged.

use crate::auth::capability::{AccessError, Capability};
use crate::auth::password::{hash_password, verify_digest};
use crate::auth::session::Session;
use crate::model::user::{AccountDraft, AccountValidationError, Role, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Bootstrap accounts created on first run, matching the original store
/// contents. Known weakness: hard-coded credentials.
const SEED_ACCOUNTS: &[(&str, &str, &str, Role)] = &[
    ("admin", "admin123", "admin@example.com", Role::Admin),
    ("manager", "manager123", "manager@example.com", Role::Manager),
    ("employee", "employee123", "employee@example.com", Role::Employee),
];

/// Service error for account use-cases.
#[derive(Debug)]
pub enum AccountError {
    /// Bad username or bad password; deliberately not distinguished.
    AuthenticationFailed,
    /// The username is already taken.
    DuplicateUsername(String),
    /// The session is inactive or lacks the capability.
    Access(AccessError),
    /// Input failed validation before any SQL ran.
    Validation(AccountValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed => write!(f, "authentication failed"),
            Self::DuplicateUsername(username) => {
                write!(f, "username already exists: {username}")
            }
            Self::Access(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateUsername(username) => Self::DuplicateUsername(username),
            other => Self::Repo(other),
        }
    }
}

impl From<AccessError> for AccountError {
    fn from(value: AccessError) -> Self {
        Self::Access(value)
    }
}

impl From<AccountValidationError> for AccountError {
    fn from(value: AccountValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Account service facade over repository implementations.
pub struct AccountService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AccountService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Verifies credentials and opens a session with the capability set
    /// resolved from the stored role.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AccountError> {
        match self.repo.find_by_username(username)? {
            Some(stored) if verify_digest(password, &stored.password_hash) => {
                info!(
                    "event=login module=account status=ok role={}",
                    stored.user.role
                );
                Ok(Session::open(&stored.user))
            }
            _ => {
                info!("event=login module=account status=denied");
                Err(AccountError::AuthenticationFailed)
            }
        }
    }

    /// Deactivates the session. No store interaction happens or is
    /// guaranteed afterwards.
    pub fn logout(&self, session: &mut Session) {
        session.logout();
        info!("event=logout module=account status=ok role={}", session.role);
    }

    /// Creates one account. Requires the `create_account` capability.
    pub fn create_account(
        &self,
        session: &Session,
        draft: &AccountDraft,
        password: &str,
    ) -> Result<UserId, AccountError> {
        session.authorize(Capability::CreateAccount)?;
        draft.validate()?;

        let user_id = self.repo.create_user(draft, &hash_password(password))?;
        info!(
            "event=account_created module=account status=ok role={}",
            draft.role
        );
        Ok(user_id)
    }

    /// Creates the default admin/manager/employee accounts when no `admin`
    /// user exists yet. Idempotent across restarts.
    pub fn seed_default_accounts(&self) -> RepoResult<()> {
        if self.repo.find_by_username(SEED_ACCOUNTS[0].0)?.is_some() {
            return Ok(());
        }

        warn!(
            "event=seed_accounts module=account status=start \
             warning=hard_coded_bootstrap_credentials"
        );
        for (username, password, email, role) in SEED_ACCOUNTS {
            let draft = AccountDraft::new(*username, *email, *role);
            self.repo.create_user(&draft, &hash_password(password))?;
        }
        info!(
            "event=seed_accounts module=account status=ok count={}",
            SEED_ACCOUNTS.len()
        );
        Ok(())
    }
}

//! Core domain logic for TaskDesk.
//! This crate is the single source of truth for access-control and
//! data-integrity invariants; UI layers bind to the service facades here.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::capability::{role_capabilities, AccessError, Capability};
pub use auth::password::{hash_password, verify_digest};
pub use auth::session::Session;
pub use logging::{default_log_level, init_logging};
pub use model::task::{
    Note, NoteId, Reminder, ReminderId, Task, TaskDraft, TaskId, TaskStatus, TaskValidationError,
};
pub use model::user::{AccountDraft, AccountValidationError, Role, UserId, UserRecord};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::user_repo::{SqliteUserRepository, StoredCredentials, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::account_service::{AccountError, AccountService};
pub use service::task_service::{TaskError, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

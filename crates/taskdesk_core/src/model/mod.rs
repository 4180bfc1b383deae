//! Domain model for accounts, tasks and their annotations.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep validation rules next to the shapes they protect.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID v4.
//! - Rows are never deleted; `tasks.status` is the only mutated field.

pub mod task;
pub mod user;

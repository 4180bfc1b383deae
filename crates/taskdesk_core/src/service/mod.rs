//! Role-gated use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into capability-checked use cases.
//! - Keep UI layers decoupled from storage and authorization details.
//!
//! # Invariants
//! - Every entry point authorizes the session before touching the store.

pub mod account_service;
pub mod task_service;

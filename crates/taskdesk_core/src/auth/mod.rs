//! Authentication and capability gating.
//!
//! # Responsibility
//! - Verify credential digests against stored account rows.
//! - Resolve the per-role capability set once, at session construction.
//! - Gate every service call on the session's capability set.
//!
//! # Invariants
//! - Capability checks are deny-by-default: anything outside the role's
//!   declared set fails with `CapabilityDenied`.
//! - Passwords and digests never appear in logs or read models.

pub mod capability;
pub mod password;
pub mod session;

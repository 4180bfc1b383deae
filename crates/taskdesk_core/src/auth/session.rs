//! Session holder for one authenticated identity.
//!
//! # Responsibility
//! - Carry the authenticated identity and its role for the UI session.
//! - Resolve the capability set exactly once, when the session opens.
//!
//! # Invariants
//! - `logout()` only flips the active flag; no store interaction follows.
//! - Authorization is checked on every facade call, not only at login.

use crate::auth::capability::{role_capabilities, AccessError, Capability};
use crate::model::user::{Role, UserId, UserRecord};

/// In-memory representation of a successfully authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    capabilities: &'static [Capability],
    active: bool,
}

impl Session {
    /// Opens a session for a verified account, attaching the capability set
    /// resolved from its role.
    pub fn open(user: &UserRecord) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            capabilities: role_capabilities(user.role),
            active: true,
        }
    }

    /// Returns whether the session may still invoke facade operations.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the capability set resolved at login.
    pub fn capabilities(&self) -> &'static [Capability] {
        self.capabilities
    }

    /// Returns whether the role's capability set contains `capability`.
    pub fn permits(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Fails when the session has been logged out.
    pub fn ensure_active(&self) -> Result<(), AccessError> {
        if self.active {
            Ok(())
        } else {
            Err(AccessError::SessionInactive)
        }
    }

    /// Gate for state-changing and read facade calls.
    pub fn authorize(&self, capability: Capability) -> Result<(), AccessError> {
        self.ensure_active()?;
        if self.permits(capability) {
            Ok(())
        } else {
            Err(AccessError::CapabilityDenied {
                role: self.role,
                capability,
            })
        }
    }

    /// Deactivates the session. Idempotent.
    pub fn logout(&mut self) {
        self.active = false;
    }
}

//! Capability declarations for role-based access gates.

use crate::model::user::Role;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One operation a session may be permitted to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    CreateAccount,
    CreateTask,
    AssignTask,
    ListCreatedTasks,
    ListAssignedTasks,
    UpdateTaskStatus,
    AddNote,
    AddReminder,
}

impl Capability {
    /// Stable string id used in logs and denial messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateAccount => "create_account",
            Self::CreateTask => "create_task",
            Self::AssignTask => "assign_task",
            Self::ListCreatedTasks => "list_created_tasks",
            Self::ListAssignedTasks => "list_assigned_tasks",
            Self::UpdateTaskStatus => "update_task_status",
            Self::AddNote => "add_note",
            Self::AddReminder => "add_reminder",
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::CreateAccount => "Create new user accounts with a chosen role.",
            Self::CreateTask => "Create tasks owned by the calling manager.",
            Self::AssignTask => "Assign an existing task to an employee.",
            Self::ListCreatedTasks => "List tasks created by the caller.",
            Self::ListAssignedTasks => "List tasks assigned to the caller.",
            Self::UpdateTaskStatus => "Move a task through its status lifecycle.",
            Self::AddNote => "Attach a free-text note to a task.",
            Self::AddReminder => "Schedule a reminder for a task.",
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const ADMIN_CAPABILITIES: &[Capability] = &[Capability::CreateAccount];

const MANAGER_CAPABILITIES: &[Capability] = &[
    Capability::CreateTask,
    Capability::AssignTask,
    Capability::ListCreatedTasks,
];

const EMPLOYEE_CAPABILITIES: &[Capability] = &[
    Capability::ListAssignedTasks,
    Capability::UpdateTaskStatus,
    Capability::AddNote,
    Capability::AddReminder,
];

/// Returns the capability set attached to sessions of the given role.
pub fn role_capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Admin => ADMIN_CAPABILITIES,
        Role::Manager => MANAGER_CAPABILITIES,
        Role::Employee => EMPLOYEE_CAPABILITIES,
    }
}

/// Access gate failures raised before any store interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The session was logged out.
    SessionInactive,
    /// The capability is outside the session role's declared set.
    CapabilityDenied {
        role: Role,
        capability: Capability,
    },
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionInactive => write!(f, "session is no longer active"),
            Self::CapabilityDenied { role, capability } => {
                write!(f, "role {role} is not permitted to {capability}")
            }
        }
    }
}

impl Error for AccessError {}

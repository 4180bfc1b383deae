//! Task use-case service: creation, assignment, status, notes, reminders.
//!
//! # Responsibility
//! - Expose the manager and employee capability sets over the task
//!   aggregate repository.
//! - Authorize every call against the session's capability set.
//!
//! # Invariants
//! - `update_status` does NOT check that the caller is assigned to the
//!   task; any employee session may move any task (behavioral parity with
//!   the original system). Concurrent updates are last-write-wins.
//! - Unknown task/user ids surface from store constraints as `NotFound`,
//!   never from pre-checks.

use crate::auth::capability::{AccessError, Capability};
use crate::auth::session::Session;
use crate::model::task::{
    Note, NoteId, Reminder, ReminderId, Task, TaskDraft, TaskId, TaskStatus, TaskValidationError,
};
use crate::model::user::UserId;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskError {
    /// A targeted or referenced task/user does not exist.
    NotFound,
    /// The (task, user) assignment pair already exists.
    AlreadyAssigned { task_id: TaskId, user_id: UserId },
    /// The session is inactive or lacks the capability.
    Access(AccessError),
    /// Input failed validation before any SQL ran.
    Validation(TaskValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "task or user not found"),
            Self::AlreadyAssigned { task_id, user_id } => {
                write!(f, "task {task_id} is already assigned to user {user_id}")
            }
            Self::Access(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) | RepoError::MissingReference => Self::NotFound,
            RepoError::AlreadyAssigned { task_id, user_id } => {
                Self::AlreadyAssigned { task_id, user_id }
            }
            other => Self::Repo(other),
        }
    }
}

impl From<AccessError> for TaskError {
    fn from(value: AccessError) -> Self {
        Self::Access(value)
    }
}

impl From<TaskValidationError> for TaskError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one task owned by the calling manager, starting as `New`.
    pub fn create_task(&self, session: &Session, draft: &TaskDraft) -> Result<TaskId, TaskError> {
        session.authorize(Capability::CreateTask)?;
        draft.validate()?;

        let task_id = self.repo.create_task(draft, session.user_id)?;
        info!("event=task_created module=task status=ok task_id={task_id}");
        Ok(task_id)
    }

    /// Assigns one task to one employee. Fails with `NotFound` when either
    /// id is unknown and `AlreadyAssigned` on a duplicate pair.
    pub fn assign_task(
        &self,
        session: &Session,
        task_id: TaskId,
        employee_id: UserId,
    ) -> Result<(), TaskError> {
        session.authorize(Capability::AssignTask)?;

        self.repo.assign_task(task_id, employee_id)?;
        info!("event=task_assigned module=task status=ok task_id={task_id}");
        Ok(())
    }

    /// Lists tasks created by the calling manager.
    pub fn list_created_tasks(&self, session: &Session) -> Result<Vec<Task>, TaskError> {
        session.authorize(Capability::ListCreatedTasks)?;
        Ok(self.repo.list_created(session.user_id)?)
    }

    /// Lists tasks assigned to the calling employee.
    pub fn list_assigned_tasks(&self, session: &Session) -> Result<Vec<Task>, TaskError> {
        session.authorize(Capability::ListAssignedTasks)?;
        Ok(self.repo.list_assigned(session.user_id)?)
    }

    /// Overwrites the status of one task. The caller does not have to be
    /// assigned to it.
    pub fn update_status(
        &self,
        session: &Session,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<(), TaskError> {
        session.authorize(Capability::UpdateTaskStatus)?;

        self.repo.update_status(task_id, status)?;
        info!("event=task_status module=task status=ok task_id={task_id} new_status={status}");
        Ok(())
    }

    /// Attaches one note to a task, authored by the calling employee.
    pub fn add_note(
        &self,
        session: &Session,
        task_id: TaskId,
        content: &str,
    ) -> Result<NoteId, TaskError> {
        session.authorize(Capability::AddNote)?;
        Ok(self.repo.add_note(task_id, content, session.user_id)?)
    }

    /// Schedules one reminder for a task, authored by the calling employee.
    pub fn add_reminder(
        &self,
        session: &Session,
        task_id: TaskId,
        description: &str,
        reminder_time: i64,
    ) -> Result<ReminderId, TaskError> {
        session.authorize(Capability::AddReminder)?;
        Ok(self
            .repo
            .add_reminder(task_id, description, reminder_time, session.user_id)?)
    }

    /// Lists a task's notes, newest first. Any active session may read.
    pub fn list_notes(&self, session: &Session, task_id: TaskId) -> Result<Vec<Note>, TaskError> {
        session.ensure_active()?;
        Ok(self.repo.list_notes(task_id)?)
    }

    /// Lists a task's reminders by fire time. Any active session may read.
    pub fn list_reminders(
        &self,
        session: &Session,
        task_id: TaskId,
    ) -> Result<Vec<Reminder>, TaskError> {
        session.ensure_active()?;
        Ok(self.repo.list_reminders(task_id)?)
    }
}

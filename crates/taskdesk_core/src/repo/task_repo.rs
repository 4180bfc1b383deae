//! Task aggregate repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist tasks, assignments, notes and reminders as one aggregate.
//! - Classify assignment constraint violations (`AlreadyAssigned`,
//!   `MissingReference`) from SQLite extended result codes.
//!
//! # Invariants
//! - Every operation is a single statement on the borrowed connection.
//! - List orderings are stable: created tasks by `created_at DESC,
//!   task_id ASC`; notes newest-first; reminders by fire time ascending.

use crate::model::task::{Note, NoteId, Reminder, ReminderId, Task, TaskDraft, TaskId, TaskStatus};
use crate::model::user::UserId;
use crate::repo::{
    ensure_schema_ready, is_foreign_key_violation, is_unique_violation, parse_uuid, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    t.task_id,
    t.title,
    t.description,
    t.priority,
    t.deadline,
    t.category,
    t.status,
    t.created_by,
    t.created_at
FROM tasks t";

/// Repository interface for the task aggregate.
pub trait TaskRepository {
    /// Inserts one task with status `New` and returns its generated id.
    fn create_task(&self, draft: &TaskDraft, created_by: UserId) -> RepoResult<TaskId>;
    /// Looks up one task by id.
    fn get_task(&self, task_id: TaskId) -> RepoResult<Option<Task>>;
    /// Links one task to one user. Duplicate pairs and unknown ids fail.
    fn assign_task(&self, task_id: TaskId, user_id: UserId) -> RepoResult<()>;
    /// Lists tasks created by the given user.
    fn list_created(&self, creator: UserId) -> RepoResult<Vec<Task>>;
    /// Lists tasks assigned to the given user.
    fn list_assigned(&self, assignee: UserId) -> RepoResult<Vec<Task>>;
    /// Overwrites the task status. Last write wins.
    fn update_status(&self, task_id: TaskId, status: TaskStatus) -> RepoResult<()>;
    /// Attaches one note to a task and returns its generated id.
    fn add_note(&self, task_id: TaskId, content: &str, created_by: UserId) -> RepoResult<NoteId>;
    /// Lists a task's notes, newest first.
    fn list_notes(&self, task_id: TaskId) -> RepoResult<Vec<Note>>;
    /// Schedules one reminder for a task and returns its generated id.
    fn add_reminder(
        &self,
        task_id: TaskId,
        description: &str,
        reminder_time: i64,
        created_by: UserId,
    ) -> RepoResult<ReminderId>;
    /// Lists a task's reminders by fire time ascending.
    fn list_reminders(&self, task_id: TaskId) -> RepoResult<Vec<Reminder>>;
}

/// SQLite-backed task aggregate repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "tasks")?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, draft: &TaskDraft, created_by: UserId) -> RepoResult<TaskId> {
        let task_id = Uuid::new_v4();
        let result = self.conn.execute(
            "INSERT INTO tasks (
                task_id,
                title,
                description,
                priority,
                deadline,
                category,
                status,
                created_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task_id.to_string(),
                draft.title.as_str(),
                draft.description.as_str(),
                draft.priority.as_str(),
                draft.deadline,
                draft.category.as_str(),
                TaskStatus::New.as_db_str(),
                created_by.to_string(),
            ],
        );

        match result {
            Ok(_) => Ok(task_id),
            Err(err) if is_foreign_key_violation(&err) => Err(RepoError::MissingReference),
            Err(err) => Err(err.into()),
        }
    }

    fn get_task(&self, task_id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE t.task_id = ?1;"))?;

        let mut rows = stmt.query([task_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn assign_task(&self, task_id: TaskId, user_id: UserId) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO task_assignments (task_id, user_id) VALUES (?1, ?2);",
            params![task_id.to_string(), user_id.to_string()],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::AlreadyAssigned { task_id, user_id })
            }
            Err(err) if is_foreign_key_violation(&err) => Err(RepoError::MissingReference),
            Err(err) => Err(err.into()),
        }
    }

    fn list_created(&self, creator: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE t.created_by = ?1
             ORDER BY t.created_at DESC, t.task_id ASC;"
        ))?;

        let tasks = collect_tasks(stmt.query([creator.to_string()])?);
        tasks
    }

    fn list_assigned(&self, assignee: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             JOIN task_assignments ta ON ta.task_id = t.task_id
             WHERE ta.user_id = ?1
             ORDER BY ta.assigned_at DESC, t.task_id ASC;"
        ))?;

        let tasks = collect_tasks(stmt.query([assignee.to_string()])?);
        tasks
    }

    fn update_status(&self, task_id: TaskId, status: TaskStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?1 WHERE task_id = ?2;",
            params![status.as_db_str(), task_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task_id));
        }

        Ok(())
    }

    fn add_note(&self, task_id: TaskId, content: &str, created_by: UserId) -> RepoResult<NoteId> {
        let note_id = Uuid::new_v4();
        let result = self.conn.execute(
            "INSERT INTO notes (note_id, task_id, content, created_by)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                note_id.to_string(),
                task_id.to_string(),
                content,
                created_by.to_string(),
            ],
        );

        match result {
            Ok(_) => Ok(note_id),
            Err(err) if is_foreign_key_violation(&err) => Err(RepoError::MissingReference),
            Err(err) => Err(err.into()),
        }
    }

    fn list_notes(&self, task_id: TaskId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                note_id,
                task_id,
                content,
                created_by,
                created_at
             FROM notes
             WHERE task_id = ?1
             ORDER BY created_at DESC, note_id ASC;",
        )?;

        let mut rows = stmt.query([task_id.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn add_reminder(
        &self,
        task_id: TaskId,
        description: &str,
        reminder_time: i64,
        created_by: UserId,
    ) -> RepoResult<ReminderId> {
        let reminder_id = Uuid::new_v4();
        let result = self.conn.execute(
            "INSERT INTO reminders (reminder_id, task_id, description, reminder_time, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                reminder_id.to_string(),
                task_id.to_string(),
                description,
                reminder_time,
                created_by.to_string(),
            ],
        );

        match result {
            Ok(_) => Ok(reminder_id),
            Err(err) if is_foreign_key_violation(&err) => Err(RepoError::MissingReference),
            Err(err) => Err(err.into()),
        }
    }

    fn list_reminders(&self, task_id: TaskId) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                reminder_id,
                task_id,
                description,
                reminder_time,
                created_by,
                created_at
             FROM reminders
             WHERE task_id = ?1
             ORDER BY reminder_time ASC, reminder_id ASC;",
        )?;

        let mut rows = stmt.query([task_id.to_string()])?;
        let mut reminders = Vec::new();
        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        Ok(reminders)
    }
}

fn collect_tasks(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Task>> {
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("task_id")?;
    let task_id = parse_uuid(&id_text, "tasks.task_id")?;

    let status_text: String = row.get("status")?;
    let status = TaskStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in tasks.status"))
    })?;

    let creator_text: String = row.get("created_by")?;
    let created_by = parse_uuid(&creator_text, "tasks.created_by")?;

    Ok(Task {
        task_id,
        title: row.get("title")?,
        description: row.get("description")?,
        priority: row.get("priority")?,
        deadline: row.get("deadline")?,
        category: row.get("category")?,
        status,
        created_by,
        created_at: row.get("created_at")?,
    })
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("note_id")?;
    let task_text: String = row.get("task_id")?;
    let creator_text: String = row.get("created_by")?;

    Ok(Note {
        note_id: parse_uuid(&id_text, "notes.note_id")?,
        task_id: parse_uuid(&task_text, "notes.task_id")?,
        content: row.get("content")?,
        created_by: parse_uuid(&creator_text, "notes.created_by")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    let id_text: String = row.get("reminder_id")?;
    let task_text: String = row.get("task_id")?;
    let creator_text: String = row.get("created_by")?;

    Ok(Reminder {
        reminder_id: parse_uuid(&id_text, "reminders.reminder_id")?,
        task_id: parse_uuid(&task_text, "reminders.task_id")?,
        description: row.get("description")?,
        reminder_time: row.get("reminder_time")?,
        created_by: parse_uuid(&creator_text, "reminders.created_by")?,
        created_at: row.get("created_at")?,
    })
}

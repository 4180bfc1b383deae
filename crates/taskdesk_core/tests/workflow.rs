//! End-to-end scenario: an admin provisions a manager, the manager creates
//! and assigns a task, and the employee works it to completion.

use rusqlite::Connection;
use taskdesk_core::db::open_db_in_memory;
use taskdesk_core::{
    AccountDraft, AccountService, Role, SqliteTaskRepository, SqliteUserRepository, TaskDraft,
    TaskService, TaskStatus,
};

fn services(
    conn: &Connection,
) -> (
    AccountService<SqliteUserRepository<'_>>,
    TaskService<SqliteTaskRepository<'_>>,
) {
    let accounts = AccountService::new(SqliteUserRepository::try_new(conn).unwrap());
    accounts.seed_default_accounts().unwrap();
    let tasks = TaskService::new(SqliteTaskRepository::try_new(conn).unwrap());
    (accounts, tasks)
}

#[test]
fn admin_manager_employee_workflow() {
    let conn = open_db_in_memory().unwrap();
    let (accounts, tasks) = services(&conn);

    // Admin provisions the manager and the employee.
    let mut admin = accounts.login("admin", "admin123").unwrap();
    accounts
        .create_account(
            &admin,
            &AccountDraft::new("m1", "m1@example.com", Role::Manager),
            "pw1",
        )
        .unwrap();
    let e1_id = accounts
        .create_account(
            &admin,
            &AccountDraft::new("e1", "e1@example.com", Role::Employee),
            "pwe",
        )
        .unwrap();
    accounts.logout(&mut admin);

    // Manager creates and assigns the task.
    let mut m1 = accounts.login("m1", "pw1").unwrap();
    let task_id = tasks
        .create_task(
            &m1,
            &TaskDraft {
                title: "Ship release".to_string(),
                description: "cut and publish the release".to_string(),
                priority: "High".to_string(),
                deadline: None,
                category: "release".to_string(),
            },
        )
        .unwrap();
    tasks.assign_task(&m1, task_id, e1_id).unwrap();

    // Employee finds exactly one assigned task, still new.
    let mut e1 = accounts.login("e1", "pwe").unwrap();
    let assigned = tasks.list_assigned_tasks(&e1).unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].task_id, task_id);
    assert_eq!(assigned[0].title, "Ship release");
    assert_eq!(assigned[0].priority, "High");
    assert_eq!(assigned[0].status, TaskStatus::New);

    // Employee starts the work and leaves a trail.
    tasks
        .update_status(&e1, task_id, TaskStatus::InProgress)
        .unwrap();
    tasks.add_note(&e1, task_id, "started the build").unwrap();
    tasks
        .add_reminder(&e1, task_id, "check the pipeline", 1_900_000_000_000)
        .unwrap();

    // Manager sees the new status immediately.
    let created = tasks.list_created_tasks(&m1).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].status, TaskStatus::InProgress);

    let notes = tasks.list_notes(&m1, task_id).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "started the build");
    assert_eq!(notes[0].created_by, e1.user_id);

    let reminders = tasks.list_reminders(&m1, task_id).unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].description, "check the pipeline");

    accounts.logout(&mut e1);
    accounts.logout(&mut m1);
    assert!(!e1.is_active());
    assert!(!m1.is_active());
}

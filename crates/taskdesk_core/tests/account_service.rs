use rusqlite::Connection;
use taskdesk_core::db::open_db_in_memory;
use taskdesk_core::{
    AccessError, AccountDraft, AccountError, AccountService, AccountValidationError, RepoError,
    Role, SqliteUserRepository,
};

fn service(conn: &Connection) -> AccountService<SqliteUserRepository<'_>> {
    AccountService::new(SqliteUserRepository::try_new(conn).unwrap())
}

#[test]
fn create_account_then_login_returns_matching_role() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.seed_default_accounts().unwrap();

    let admin = accounts.login("admin", "admin123").unwrap();
    let draft = AccountDraft::new("m1", "m1@example.com", Role::Manager);
    let created_id = accounts.create_account(&admin, &draft, "pw1").unwrap();

    let session = accounts.login("m1", "pw1").unwrap();
    assert_eq!(session.user_id, created_id);
    assert_eq!(session.username, "m1");
    assert_eq!(session.email, "m1@example.com");
    assert_eq!(session.role, Role::Manager);
    assert!(session.is_active());
}

#[test]
fn login_fails_the_same_way_for_bad_password_and_unknown_username() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.seed_default_accounts().unwrap();

    let err = accounts.login("admin", "wrong").unwrap_err();
    assert!(matches!(err, AccountError::AuthenticationFailed));

    let err = accounts.login("no-such-user", "admin123").unwrap_err();
    assert!(matches!(err, AccountError::AuthenticationFailed));
}

#[test]
fn duplicate_username_fails_and_keeps_exactly_one_row() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.seed_default_accounts().unwrap();
    let admin = accounts.login("admin", "admin123").unwrap();

    let draft = AccountDraft::new("dup", "first@example.com", Role::Employee);
    accounts.create_account(&admin, &draft, "pw-a").unwrap();

    let retry = AccountDraft::new("dup", "second@example.com", Role::Manager);
    let err = accounts.create_account(&admin, &retry, "pw-b").unwrap_err();
    assert!(matches!(err, AccountError::DuplicateUsername(name) if name == "dup"));

    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users WHERE username = 'dup';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn seeding_is_idempotent_and_seeded_credentials_log_in() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);

    accounts.seed_default_accounts().unwrap();
    accounts.seed_default_accounts().unwrap();

    let total: i64 = conn
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(total, 3);

    let admin = accounts.login("admin", "admin123").unwrap();
    assert_eq!(admin.role, Role::Admin);
    let manager = accounts.login("manager", "manager123").unwrap();
    assert_eq!(manager.role, Role::Manager);
    let employee = accounts.login("employee", "employee123").unwrap();
    assert_eq!(employee.role, Role::Employee);
}

#[test]
fn create_account_requires_the_admin_capability() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.seed_default_accounts().unwrap();
    let manager = accounts.login("manager", "manager123").unwrap();

    let draft = AccountDraft::new("intruder", "i@example.com", Role::Admin);
    let err = accounts.create_account(&manager, &draft, "pw").unwrap_err();
    assert!(matches!(
        err,
        AccountError::Access(AccessError::CapabilityDenied { .. })
    ));
}

#[test]
fn logged_out_session_cannot_create_accounts() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.seed_default_accounts().unwrap();

    let mut admin = accounts.login("admin", "admin123").unwrap();
    accounts.logout(&mut admin);
    assert!(!admin.is_active());

    let draft = AccountDraft::new("late", "late@example.com", Role::Employee);
    let err = accounts.create_account(&admin, &draft, "pw").unwrap_err();
    assert!(matches!(
        err,
        AccountError::Access(AccessError::SessionInactive)
    ));
}

#[test]
fn blank_account_input_is_rejected_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.seed_default_accounts().unwrap();
    let admin = accounts.login("admin", "admin123").unwrap();

    let draft = AccountDraft::new("   ", "blank@example.com", Role::Employee);
    let err = accounts.create_account(&admin, &draft, "pw").unwrap_err();
    assert!(matches!(
        err,
        AccountError::Validation(AccountValidationError::BlankUsername)
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteUserRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_users_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        taskdesk_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteUserRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("users"))
    ));
}

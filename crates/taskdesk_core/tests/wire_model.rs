use taskdesk_core::{Note, Role, Task, TaskStatus, UserRecord};
use uuid::Uuid;

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let creator = Uuid::parse_str("99999999-2222-4333-8444-555555555555").unwrap();
    let task = Task {
        task_id,
        title: "Ship release".to_string(),
        description: "cut and publish".to_string(),
        priority: "High".to_string(),
        deadline: Some(1_900_000_000_000),
        category: "release".to_string(),
        status: TaskStatus::InProgress,
        created_by: creator,
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["task_id"], task_id.to_string());
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["deadline"], 1_900_000_000_000_i64);
    assert_eq!(json["created_by"], creator.to_string());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn user_record_serialization_uses_snake_case_roles() {
    let record = UserRecord {
        user_id: Uuid::new_v4(),
        username: "m1".to_string(),
        email: "m1@example.com".to_string(),
        role: Role::Manager,
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["role"], "manager");
    assert!(json.get("password_hash").is_none());

    let decoded: UserRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn note_round_trips_through_json() {
    let note = Note {
        note_id: Uuid::new_v4(),
        task_id: Uuid::new_v4(),
        content: "started the build".to_string(),
        created_by: Uuid::new_v4(),
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["content"], "started the build");
    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

//! Integration tests for the study workflow.
//!
//! Drives the controller the way the presentation layer does: create,
//! schedule, complete, then reopen from the same store.

use studymate_core::{
    BlobStore, Database, Event, Grade, PersistedState, PersistenceGateway, Phase, StudyApp,
};

fn open(db: Database) -> StudyApp<Database> {
    StudyApp::open(PersistenceGateway::new(db))
}

#[test]
fn test_schedule_and_complete_scenario() {
    let mut app = open(Database::open_memory().unwrap());
    let streak_before = app.streak();

    let a = app.create_task("Math", "pp1-10", 2).unwrap();
    app.set_schedule_order(vec![a.id.clone()]);
    assert_eq!(app.dashboard().current_task.unwrap().id, a.id);

    let event = app.complete_task(&a.id, Some("A")).unwrap();
    match event {
        Event::TaskCompleted { grade, score, .. } => {
            assert_eq!(grade, Grade::A);
            assert_eq!(score, 3);
        }
        other => panic!("Expected TaskCompleted, got {other:?}"),
    }

    let history = app.history_log().entries;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, a.id);
    assert_eq!(history[0].score, Some(3));
    assert!(app.schedule().ids().is_empty());
    assert!(app.task_editor().pool.is_empty());
    assert_eq!(app.streak(), streak_before + 1);

    let dash = app.dashboard();
    assert_eq!(dash.goal.completed, 1);
    assert_eq!(dash.today_average_display, "3.0");
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studymate.db");

    let saved = {
        let mut app = open(Database::open_at(&path).unwrap());
        let a = app.create_task("Math", "pp1-10", 2).unwrap();
        let b = app.create_task("", "vocab", 0).unwrap();
        app.set_schedule_order(vec![b.id.clone(), a.id.clone()]);
        app.complete_task(&a.id, Some("AA")).unwrap();
        app.create_long_term_task(
            "Exam",
            "Mock exam",
            chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
        .unwrap();
        app.set_daily_goal(3).unwrap();
        app.update_settings(45, 15).unwrap();
        app.start_timer();
        app.tick_timer();
        app.snapshot()
    };

    let app = open(Database::open_at(&path).unwrap());
    assert_eq!(app.snapshot(), saved);
    assert_eq!(app.task_editor().schedule.len(), 1);
    assert_eq!(app.goals().long_term_tasks.len(), 1);
    // Live countdown is not durable: a reopened app starts a fresh work phase.
    assert!(!app.timer().is_running());
    assert_eq!(app.timer().phase(), Phase::Work);
    assert_eq!(app.timer().format_remaining(), "45:00");
}

#[test]
fn test_corrupt_blob_opens_with_defaults() {
    let mut db = Database::open_memory().unwrap();
    db.set("study_mate_data", "definitely not json").unwrap();
    let app = open(db);
    assert_eq!(app.snapshot(), PersistedState::default());
}

#[test]
fn test_original_blob_is_readable() {
    let mut db = Database::open_memory().unwrap();
    db.set(
        "study_mate_data",
        r#"{
            "tasks": [
                {"id": "1", "subject": "Math", "content": "pp1-10", "createdAt": "2024-06-10T06:00:00.000Z", "completed": true, "plannedSlots": 2, "completedAt": "2024-06-10T08:00:00.000Z", "grade": "A", "score": 3},
                {"id": "2", "subject": "English", "content": "vocab", "createdAt": "2024-06-10T06:05:00.000Z", "completed": false, "plannedSlots": 1}
            ],
            "longTermTasks": [
                {"id": "3", "subject": "Exam", "content": "Mock", "createdAt": "2024-06-10T06:10:00.000Z", "completed": false, "deadline": "2024-09-01"}
            ],
            "history": [
                {"id": "1", "subject": "Math", "content": "pp1-10", "createdAt": "2024-06-10T06:00:00.000Z", "completed": true, "plannedSlots": 2, "completedAt": "2024-06-10T08:00:00.000Z", "grade": "A", "score": 3}
            ],
            "schedule": ["1", "2", "2"],
            "dailyGoalSlots": 5,
            "settings": {"pomodoroTime": 30, "breakTime": 10, "youtubeUrl": "https://example.invalid/embed"},
            "streak": 1
        }"#,
    )
    .unwrap();

    let app = open(db);
    assert_eq!(app.streak(), 1);
    assert_eq!(app.schedule().ids(), &["2".to_string()]);
    assert_eq!(app.dashboard().current_task.unwrap().content, "vocab");
    assert_eq!(app.daily_goal_slots(), 5);
    assert_eq!(app.timer().format_remaining(), "30:00");
    assert_eq!(app.history_log().entries[0].grade, Some(Grade::A));
}

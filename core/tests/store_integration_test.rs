//! End-to-end domain store scenarios over the in-memory gateway

mod common;

use common::{slot, slot_by, TestState};
use fitcoach_core::gateway::collections;
use fitcoach_core::policy;
use fitcoach_shared::{Mood, StoreError, Weekday};

#[tokio::test]
async fn plan_written_for_today_is_what_today_workout_returns() {
    let mut test = TestState::new();
    test.add_client("c1");
    let today = Weekday::today();

    let slots = vec![slot("squat"), slot("plank"), slot("pushup")];
    test.state
        .store
        .update_weekly_plan("c1", today, slots.clone(), true)
        .unwrap();

    let plan = test.state.store.today_workout("c1").unwrap();
    assert_eq!(plan, slots);
    assert!(test
        .state
        .store
        .client("c1")
        .unwrap()
        .self_organized_days
        .contains(&today));
}

#[tokio::test]
async fn duplicate_slot_insert_is_rejected_and_state_unchanged() {
    let mut test = TestState::new();
    test.add_client("c1");

    test.state
        .store
        .add_plan_exercise("c1", Weekday::Mon, slot("squat"))
        .unwrap();
    let result = test
        .state
        .store
        .add_plan_exercise("c1", Weekday::Mon, slot("squat"));

    assert!(matches!(result, Err(StoreError::Conflict(_))));
    let plan = test.state.store.workout_for_day("c1", Weekday::Mon).unwrap();
    assert_eq!(plan.len(), 1);
}

#[tokio::test]
async fn client_path_removal_policy_gates_trainer_authored_slots() {
    let mut test = TestState::new();
    test.add_client("c1");

    test.state
        .store
        .add_plan_exercise("c1", Weekday::Mon, slot_by("squat", "c1"))
        .unwrap();
    test.state
        .store
        .add_plan_exercise("c1", Weekday::Mon, slot_by("plank", "trainer-7"))
        .unwrap();

    // The client-facing surface checks the predicate before removing
    let plan = test.state.store.workout_for_day("c1", Weekday::Mon).unwrap();
    let removable: Vec<String> = plan
        .iter()
        .filter(|s| policy::can_remove_slot("c1", s))
        .map(|s| s.exercise_id.clone())
        .collect();
    assert_eq!(removable, vec!["squat".to_string()]);

    for exercise_id in removable {
        test.state
            .store
            .remove_plan_exercise("c1", Weekday::Mon, &exercise_id)
            .unwrap();
    }
    let remaining = test.state.store.workout_for_day("c1", Weekday::Mon).unwrap();
    assert_eq!(remaining[0].exercise_id, "plank");
}

#[tokio::test]
async fn completed_workout_reaches_the_remote_row() {
    let mut test = TestState::new();
    test.add_client("c1");
    let today = Weekday::today();
    test.state
        .store
        .update_weekly_plan("c1", today, vec![slot("squat")], false)
        .unwrap();

    let entry = test
        .state
        .store
        .complete_workout_with_history("c1", Some(Mood::Strong), Some("felt great".into()), Some(40))
        .unwrap();
    test.drain_mirrors().await;

    let row = test.gateway.row(collections::CLIENTS, "c1").unwrap();
    let history = row["workoutHistory"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"], serde_json::json!(entry.id));
    assert_eq!(history[0]["mood"], serde_json::json!("strong"));
    assert_eq!(row["completedWorkouts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn apply_program_then_complete_each_session_day() {
    let mut test = TestState::new();
    test.add_client("c1");
    test.state.store.set_programs(vec![fitcoach_shared::WorkoutProgram {
        id: "base".into(),
        title: "Base".into(),
        description: String::new(),
        difficulty: fitcoach_shared::FitnessLevel::Beginner,
        duration_weeks: 4,
        sessions_per_week: 3,
        exercises: vec![
            "squat".into(),
            "pushup".into(),
            "plank".into(),
            "lunge".into(),
            "crunch".into(),
            "bent-over-row".into(),
        ],
        color: "teal".into(),
    }]);

    test.state.store.apply_workout_program("c1", "base").unwrap();

    let client = test.state.store.client("c1").unwrap();
    assert_eq!(client.weekly_plan.len(), 3);
    let total: usize = Weekday::ALL.iter().map(|d| client.plan_for(*d).len()).sum();
    assert_eq!(total, 6);
    // Program days are trainer-organized
    assert!(client.self_organized_days.is_empty());
}

#[tokio::test]
async fn contraindicated_generator_output_is_flagged_not_filtered() {
    let mut test = TestState::new();
    test.add_client("c1");
    test.state
        .store
        .update_client(
            "c1",
            fitcoach_shared::ClientUpdate {
                contraindications: Some(["knees".to_string()].into_iter().collect()),
                ..Default::default()
            },
        )
        .unwrap();

    let request = fitcoach_shared::GeneratorRequest {
        muscle_groups: [fitcoach_shared::MuscleGroup::Legs].into_iter().collect(),
        duration_minutes: 45,
        equipment: fitcoach_shared::Equipment::Home,
    };
    let plan = fitcoach_core::generator::generate(test.state.store.catalog(), &request).unwrap();
    // The generator is free to return knee-loading leg work
    assert!(!plan.is_empty());

    let client = test.state.store.client("c1").unwrap();
    let warnings = policy::flag_generated_plan(client, test.state.store.catalog(), &plan);
    let flagged_knee_work = plan.iter().any(|s| {
        test.state
            .store
            .catalog()
            .get(&s.exercise_id)
            .is_some_and(|e| e.avoid_if.contains(&"knees".to_string()))
    });
    assert_eq!(flagged_knee_work, !warnings.is_empty());
    for warning in warnings {
        assert!(warning.tags.contains(&"knees".to_string()));
    }
}

#[tokio::test]
async fn unlinked_notification_is_dropped_and_linked_one_delivered() {
    let mut test = TestState::new();
    test.add_client("c1");

    test.state.store.notify_client("c1", "first").unwrap();
    test.drain_mirrors().await;
    assert!(test.relay.messages().is_empty());

    test.state.store.link_telegram("c1", "424242").unwrap();
    test.state.store.notify_client("c1", "second").unwrap();
    test.drain_mirrors().await;
    assert_eq!(test.relay.messages(), vec![("424242".into(), "second".into())]);
}

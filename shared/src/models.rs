//! Data models for the Fitcoach trainer/client application
//!
//! Field names serialize as camelCase to stay compatible with the rows the
//! Mini App front-end and the webhook relay already write to Supabase.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Trainer,
}

/// Primary target area of an exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl MuscleGroup {
    /// All groups, in display order
    pub const ALL: [MuscleGroup; 6] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
    ];
}

/// Training equipment context
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Gym,
    Home,
    PullupOnly,
}

/// Self-reported mood after a workout (5-point scale)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Strong,
    Good,
    Normal,
    Tired,
    Exhausted,
}

/// Client fitness level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Weekday key of the weekly plan
///
/// Ordering is Mon..Sun so `BTreeMap<Weekday, _>` iterates in calendar order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All weekdays, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Map a JS-style numeric day of week (0 = Sunday .. 6 = Saturday)
    pub fn from_index(index: u32) -> Option<Weekday> {
        match index {
            0 => Some(Weekday::Sun),
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            _ => None,
        }
    }

    /// Weekday of an arbitrary date
    pub fn from_date(date: chrono::NaiveDate) -> Weekday {
        Weekday::from_chrono(date.weekday())
    }

    /// Weekday for "now" on the caller's wall clock
    pub fn today() -> Weekday {
        Weekday::from_chrono(Local::now().weekday())
    }

    pub fn from_chrono(weekday: chrono::Weekday) -> Weekday {
        match weekday {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// One slot in a day's plan
///
/// Equality for "already planned" checks is by `exercise_id` only; two slots
/// with the same exercise but different sets/reps still count as duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanExercise {
    pub exercise_id: String,
    pub sets: u32,
    pub reps: u32,
    /// Id of the account that added the slot (client self-add vs trainer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl PartialEq for WorkoutPlanExercise {
    fn eq(&self, other: &Self) -> bool {
        self.exercise_id == other.exercise_id
    }
}

impl Eq for WorkoutPlanExercise {}

/// Catalog exercise (immutable reference data, loaded once at startup)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub muscle_group: MuscleGroup,
    /// Equipment contexts this exercise works in; empty means "any context"
    #[serde(default)]
    pub equipment: BTreeSet<Equipment>,
    /// Contraindication tags under which this exercise should be avoided
    #[serde(default)]
    pub avoid_if: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

/// One recorded set inside a completed workout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformedSet {
    pub reps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    pub completed: bool,
}

/// One exercise as actually performed in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformedExercise {
    pub exercise_id: String,
    /// Resolved display name, denormalized into the immutable history entry
    #[serde(default)]
    pub name: String,
    pub sets: Vec<PerformedSet>,
}

/// Completed-workout record (append-only; never mutated after creation)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutHistoryEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub label: String,
    pub exercises: Vec<PerformedExercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    pub completed: bool,
}

/// Compact completed-workout summary kept alongside the detailed history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWorkoutSummary {
    pub id: String,
    pub date: DateTime<Utc>,
    pub label: String,
    pub exercise_count: usize,
}

/// Program template: a flat exercise list expanded into a weekly plan on apply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutProgram {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: FitnessLevel,
    pub duration_weeks: u32,
    pub sessions_per_week: u32,
    pub exercises: Vec<String>,
    #[serde(default)]
    pub color: String,
}

/// A client as held by the domain store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<FitnessLevel>,
    pub equipment: Equipment,
    /// Health restriction tags; set semantics, no duplicates
    #[serde(default)]
    pub contraindications: BTreeSet<String>,
    /// Weekday -> ordered planned slots; no duplicate exercise per day
    #[serde(default)]
    pub weekly_plan: BTreeMap<Weekday, Vec<WorkoutPlanExercise>>,
    /// Days the client edited personally rather than the trainer
    #[serde(default)]
    pub self_organized_days: BTreeSet<Weekday>,
    #[serde(default)]
    pub completed_workouts: Vec<CompletedWorkoutSummary>,
    #[serde(default)]
    pub workout_history: Vec<WorkoutHistoryEntry>,
    /// Exercises of the session currently in progress, if any
    #[serde(default)]
    pub current_session: Vec<PerformedExercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_chat_id: Option<String>,
    #[serde(default)]
    pub telegram_linked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_trainer_id: Option<String>,
    pub is_first_login: bool,
    #[serde(default)]
    pub trainer_notes: String,
}

impl Client {
    /// A client fresh from registration, before any trainer touched them
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            role: Role::Client,
            goal: None,
            fitness_level: None,
            equipment: Equipment::Home,
            contraindications: BTreeSet::new(),
            weekly_plan: BTreeMap::new(),
            self_organized_days: BTreeSet::new(),
            completed_workouts: Vec::new(),
            workout_history: Vec::new(),
            current_session: Vec::new(),
            telegram_chat_id: None,
            telegram_linked: false,
            assigned_trainer_id: None,
            is_first_login: true,
            trainer_notes: String::new(),
        }
    }

    /// Planned slots for a given weekday (empty when nothing is planned)
    pub fn plan_for(&self, day: Weekday) -> &[WorkoutPlanExercise] {
        self.weekly_plan.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Status of a client -> trainer coaching request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// Pending and accepted requests block a new request for the same pair
    pub fn is_active(self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Accepted)
    }
}

/// Client -> trainer relationship-establishment handshake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingRequest {
    pub id: String,
    pub client_id: String,
    pub trainer_id: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Weekday::Sun)]
    #[case(1, Weekday::Mon)]
    #[case(2, Weekday::Tue)]
    #[case(3, Weekday::Wed)]
    #[case(4, Weekday::Thu)]
    #[case(5, Weekday::Fri)]
    #[case(6, Weekday::Sat)]
    fn weekday_from_js_index(#[case] index: u32, #[case] expected: Weekday) {
        assert_eq!(Weekday::from_index(index), Some(expected));
    }

    #[test]
    fn weekday_from_index_rejects_out_of_range() {
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn weekday_from_known_dates() {
        // 2025-01-05 was a Sunday, 2025-01-08 a Wednesday
        let sunday = chrono::NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let wednesday = chrono::NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        assert_eq!(Weekday::from_date(sunday), Weekday::Sun);
        assert_eq!(Weekday::from_date(wednesday), Weekday::Wed);
    }

    #[test]
    fn plan_exercise_equality_is_by_exercise_id() {
        let a = WorkoutPlanExercise {
            exercise_id: "squat".into(),
            sets: 3,
            reps: 10,
            created_by: None,
        };
        let b = WorkoutPlanExercise {
            exercise_id: "squat".into(),
            sets: 5,
            reps: 5,
            created_by: Some("c1".into()),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn new_client_defaults() {
        let client = Client::new("c1", "Anna");
        assert_eq!(client.role, Role::Client);
        assert!(client.is_first_login);
        assert!(client.weekly_plan.is_empty());
        assert!(!client.telegram_linked);
        assert!(client.plan_for(Weekday::Mon).is_empty());
    }

    #[test]
    fn client_round_trips_through_json() {
        let mut client = Client::new("c1", "Anna");
        client.contraindications.insert("knees".into());
        client.weekly_plan.insert(
            Weekday::Mon,
            vec![WorkoutPlanExercise {
                exercise_id: "squat".into(),
                sets: 3,
                reps: 10,
                created_by: Some("t1".into()),
            }],
        );

        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["isFirstLogin"], serde_json::json!(true));
        let back: Client = serde_json::from_value(value).unwrap();
        assert_eq!(back.plan_for(Weekday::Mon).len(), 1);
        assert!(back.contraindications.contains("knees"));
    }

    #[test]
    fn request_status_activity() {
        assert!(RequestStatus::Pending.is_active());
        assert!(RequestStatus::Accepted.is_active());
        assert!(!RequestStatus::Rejected.is_active());
    }
}

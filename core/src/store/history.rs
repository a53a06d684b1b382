//! Session completion and workout-history queries

use super::DomainStore;
use chrono::{Duration, NaiveDate, Utc};
use fitcoach_shared::{
    CompletedWorkoutSummary, Mood, PerformedExercise, PerformedSet, StoreError, StoreResult,
    Weekday, WorkoutHistoryEntry, WorkoutStats,
};
use tracing::info;
use uuid::Uuid;

impl DomainStore {
    /// Replace the client's in-progress session state
    ///
    /// The UI pushes the whole list every time a set is ticked off; the
    /// store keeps only the latest snapshot until the session is completed.
    pub fn update_current_session(
        &mut self,
        client_id: &str,
        exercises: Vec<PerformedExercise>,
    ) -> StoreResult<()> {
        let client = self.client_mut(client_id)?;
        client.current_session = exercises;
        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        Ok(())
    }

    /// Build an immutable history entry from the in-progress session and
    /// append it to the client's history and completed-workout summary
    ///
    /// Not idempotent: every call appends a fresh entry with a fresh id.
    /// When no in-progress session was recorded, the entry is derived from
    /// today's plan with every set marked incomplete.
    pub fn complete_workout_with_history(
        &mut self,
        client_id: &str,
        mood: Option<Mood>,
        notes: Option<String>,
        duration_minutes: Option<u32>,
    ) -> StoreResult<WorkoutHistoryEntry> {
        let today_plan = self.workout_for_day(client_id, Weekday::today())?;
        let catalog = std::sync::Arc::clone(&self.catalog);
        let client = self.client_mut(client_id)?;

        let mut exercises = if client.current_session.is_empty() {
            today_plan
                .iter()
                .map(|slot| PerformedExercise {
                    exercise_id: slot.exercise_id.clone(),
                    name: String::new(),
                    sets: (0..slot.sets)
                        .map(|_| PerformedSet {
                            reps: slot.reps,
                            weight_kg: None,
                            completed: false,
                        })
                        .collect(),
                })
                .collect()
        } else {
            std::mem::take(&mut client.current_session)
        };
        for exercise in &mut exercises {
            if exercise.name.is_empty() {
                exercise.name = catalog.name_of(&exercise.exercise_id);
            }
        }

        let now = Utc::now();
        let entry = WorkoutHistoryEntry {
            id: Uuid::new_v4().to_string(),
            date: now,
            label: format!("Workout {}", now.format("%Y-%m-%d")),
            exercises,
            mood,
            notes,
            duration_minutes,
            completed: true,
        };

        client.completed_workouts.push(CompletedWorkoutSummary {
            id: entry.id.clone(),
            date: entry.date,
            label: entry.label.clone(),
            exercise_count: entry.exercises.len(),
        });
        client.workout_history.push(entry.clone());

        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        info!(client_id, entry_id = %entry.id, "workout completed");
        Ok(entry)
    }

    /// Full history for a client, in append order
    ///
    /// Newest-first is a presentation concern; callers sort explicitly.
    pub fn workout_history(&self, client_id: &str) -> StoreResult<&[WorkoutHistoryEntry]> {
        let client = self
            .client(client_id)
            .ok_or_else(|| StoreError::not_found("client", client_id))?;
        Ok(&client.workout_history)
    }

    /// Aggregated workout statistics for a client
    pub fn workout_stats(&self, client_id: &str) -> StoreResult<WorkoutStats> {
        let history = self.workout_history(client_id)?;

        let total_workouts = history.len();
        let total_duration_minutes = history.iter().filter_map(|e| e.duration_minutes).sum();

        let (mut sets_total, mut sets_completed) = (0usize, 0usize);
        for entry in history {
            for exercise in &entry.exercises {
                sets_total += exercise.sets.len();
                sets_completed += exercise.sets.iter().filter(|s| s.completed).count();
            }
        }
        let completion_rate = if sets_total == 0 {
            0.0
        } else {
            sets_completed as f64 / sets_total as f64
        };

        let mut dates: Vec<NaiveDate> = history.iter().map(|e| e.date.date_naive()).collect();
        dates.sort();
        dates.dedup();
        let current_streak_days = streak_days(&dates, Utc::now().date_naive());

        Ok(WorkoutStats {
            total_workouts,
            current_streak_days,
            completion_rate,
            total_duration_minutes,
        })
    }
}

/// Consecutive workout days ending today or yesterday
///
/// `dates` must be sorted ascending and deduplicated. A streak that ended
/// the day before yesterday or earlier counts as broken (0).
pub fn streak_days(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some(&last) = dates.last() else {
        return 0;
    };
    if today - last > Duration::days(1) {
        return 0;
    }

    let mut streak = 1;
    let mut expected = last;
    for &date in dates.iter().rev().skip(1) {
        expected = expected - Duration::days(1);
        if date == expected {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

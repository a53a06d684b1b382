//! Weekly-plan mutations and derived plan queries

use super::DomainStore;
use fitcoach_shared::{
    validation, StoreError, StoreResult, Weekday, WorkoutPlanExercise, WorkoutProgram,
};
use tracing::{debug, info};

/// Weekday preference when a program is expanded into a weekly plan:
/// spread sessions out before doubling up on adjacent days
const PROGRAM_DAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Wed,
    Weekday::Fri,
    Weekday::Tue,
    Weekday::Thu,
    Weekday::Sat,
    Weekday::Sun,
];

impl DomainStore {
    /// Replace the entire exercise list for a weekday (overwrite, not merge)
    ///
    /// `self_organized` marks or unmarks the day as client-edited. Duplicate
    /// exercise ids in the incoming list are dropped, keeping the first
    /// occurrence, so the per-day uniqueness invariant holds.
    pub fn update_weekly_plan(
        &mut self,
        client_id: &str,
        day: Weekday,
        exercises: Vec<WorkoutPlanExercise>,
        self_organized: bool,
    ) -> StoreResult<()> {
        for slot in &exercises {
            validation::validate_sets(slot.sets).map_err(StoreError::Validation)?;
            validation::validate_reps(slot.reps).map_err(StoreError::Validation)?;
        }

        let client = self.client_mut(client_id)?;
        let mut deduped: Vec<WorkoutPlanExercise> = Vec::with_capacity(exercises.len());
        for slot in exercises {
            if !deduped.contains(&slot) {
                deduped.push(slot);
            }
        }

        if deduped.is_empty() {
            client.weekly_plan.remove(&day);
        } else {
            client.weekly_plan.insert(day, deduped);
        }
        if self_organized {
            client.self_organized_days.insert(day);
        } else {
            client.self_organized_days.remove(&day);
        }

        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        debug!(client_id, ?day, self_organized, "weekly plan replaced");
        Ok(())
    }

    /// Append one slot to a day's list
    ///
    /// Signals `Conflict` and changes nothing when the exercise is already
    /// planned for that day; signals `NotFound` for unknown clients or
    /// exercises outside the catalog.
    pub fn add_plan_exercise(
        &mut self,
        client_id: &str,
        day: Weekday,
        slot: WorkoutPlanExercise,
    ) -> StoreResult<()> {
        validation::validate_sets(slot.sets).map_err(StoreError::Validation)?;
        validation::validate_reps(slot.reps).map_err(StoreError::Validation)?;
        if !self.catalog.contains(&slot.exercise_id) {
            return Err(StoreError::not_found("exercise", &slot.exercise_id));
        }

        let client = self.client_mut(client_id)?;
        let day_plan = client.weekly_plan.entry(day).or_default();
        if day_plan.contains(&slot) {
            return Err(StoreError::Conflict(format!(
                "exercise {} already planned for {day:?}",
                slot.exercise_id
            )));
        }
        day_plan.push(slot);

        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        Ok(())
    }

    /// Remove the slot with the given exercise id from a day's list
    ///
    /// The store has no notion of the requesting actor; the
    /// only-self-authored-slots rule is [`crate::policy::can_remove_slot`]
    /// and must be checked by the exposing surface before calling this.
    pub fn remove_plan_exercise(
        &mut self,
        client_id: &str,
        day: Weekday,
        exercise_id: &str,
    ) -> StoreResult<()> {
        let client = self.client_mut(client_id)?;
        let day_plan = client
            .weekly_plan
            .get_mut(&day)
            .ok_or_else(|| StoreError::not_found("plan for day", exercise_id))?;
        let position = day_plan
            .iter()
            .position(|slot| slot.exercise_id == exercise_id)
            .ok_or_else(|| StoreError::not_found("planned exercise", exercise_id))?;
        day_plan.remove(position);
        if day_plan.is_empty() {
            client.weekly_plan.remove(&day);
        }

        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        Ok(())
    }

    /// Planned slots for the current local day (empty when nothing planned)
    pub fn today_workout(&self, client_id: &str) -> StoreResult<Vec<WorkoutPlanExercise>> {
        self.workout_for_day(client_id, Weekday::today())
    }

    /// Planned slots for an explicit weekday
    pub fn workout_for_day(
        &self,
        client_id: &str,
        day: Weekday,
    ) -> StoreResult<Vec<WorkoutPlanExercise>> {
        let client = self
            .client(client_id)
            .ok_or_else(|| StoreError::not_found("client", client_id))?;
        Ok(client.plan_for(day).to_vec())
    }

    /// Expand a program template into the client's weekly plan
    ///
    /// The flat exercise list is split into `sessions_per_week` contiguous,
    /// near-even chunks assigned to distinct weekdays in the fixed
    /// Mon/Wed/Fri-first order. Affected days are overwritten and unmarked
    /// as self-organized.
    pub fn apply_workout_program(&mut self, client_id: &str, program_id: &str) -> StoreResult<()> {
        let program = self
            .program(program_id)
            .ok_or_else(|| StoreError::not_found("program", program_id))?
            .clone();
        validation::validate_program(&program).map_err(StoreError::Validation)?;
        if self.client(client_id).is_none() {
            return Err(StoreError::not_found("client", client_id));
        }

        let sessions = program.sessions_per_week.min(7) as usize;
        let chunks = split_into_sessions(&program.exercises, sessions);
        let days: Vec<Weekday> = PROGRAM_DAY_ORDER.iter().copied().take(chunks.len()).collect();

        for (day, chunk) in days.into_iter().zip(chunks) {
            let slots = chunk
                .into_iter()
                .map(|exercise_id| WorkoutPlanExercise {
                    exercise_id,
                    sets: 3,
                    reps: 10,
                    created_by: None,
                })
                .collect();
            self.update_weekly_plan(client_id, day, slots, false)?;
        }

        info!(client_id, program_id, title = %program.title, "program applied to weekly plan");
        Ok(())
    }
}

/// Split a flat exercise list into `sessions` contiguous near-even chunks
///
/// The first `len % sessions` chunks carry one extra exercise; chunks are
/// never empty as long as the list is at least `sessions` long.
fn split_into_sessions(exercises: &[String], sessions: usize) -> Vec<Vec<String>> {
    let sessions = sessions.max(1).min(exercises.len().max(1));
    let base = exercises.len() / sessions;
    let extra = exercises.len() % sessions;

    let mut chunks = Vec::with_capacity(sessions);
    let mut cursor = 0;
    for i in 0..sessions {
        let size = base + usize::from(i < extra);
        chunks.push(exercises[cursor..cursor + size].to_vec());
        cursor += size;
    }
    chunks.retain(|chunk| !chunk.is_empty());
    chunks
}

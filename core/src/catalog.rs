//! Exercise catalog
//!
//! Immutable reference data loaded once at startup, either from the remote
//! `exercises` collection or from the built-in seed set. The core never
//! mutates catalog entries.

use crate::error::GatewayError;
use crate::gateway::{collections, PersistenceGateway};
use fitcoach_shared::{Equipment, Exercise, MuscleGroup};
use std::collections::HashMap;

/// Lookup-friendly wrapper over the loaded exercises
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
    by_id: HashMap<String, usize>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        let by_id = exercises
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self { exercises, by_id }
    }

    /// Built-in seed set used when no remote catalog is available
    pub fn seed() -> Self {
        Self::new(seed_exercises())
    }

    /// Load the catalog from the remote `exercises` collection
    ///
    /// Falls back to nothing on its own: an empty remote catalog yields an
    /// empty local one, and the caller decides whether to seed instead.
    pub async fn load(gateway: &dyn PersistenceGateway) -> Result<Self, GatewayError> {
        let rows = gateway.select(collections::EXERCISES, None).await?;
        let mut exercises = Vec::with_capacity(rows.len());
        for row in rows {
            let exercise: Exercise =
                serde_json::from_value(row).map_err(|source| GatewayError::Decode {
                    collection: collections::EXERCISES.to_string(),
                    source,
                })?;
            exercises.push(exercise);
        }
        Ok(Self::new(exercises))
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.by_id.get(id).map(|&i| &self.exercises[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn all(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn by_muscle_group(&self, group: MuscleGroup) -> impl Iterator<Item = &Exercise> {
        self.exercises
            .iter()
            .filter(move |e| e.muscle_group == group)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Display name for an id, falling back to the raw id for unknown ones
    pub fn name_of(&self, id: &str) -> String {
        self.get(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

fn exercise(
    id: &str,
    name: &str,
    group: MuscleGroup,
    equipment: &[Equipment],
    avoid_if: &[&str],
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        muscle_group: group,
        equipment: equipment.iter().copied().collect(),
        avoid_if: avoid_if.iter().map(|t| t.to_string()).collect(),
        media_url: None,
    }
}

/// Seed catalog covering every muscle group in every equipment context
fn seed_exercises() -> Vec<Exercise> {
    use Equipment::{Gym, Home, PullupOnly};
    use MuscleGroup::{Arms, Back, Chest, Core, Legs, Shoulders};

    vec![
        exercise("pushup", "Push-up", Chest, &[], &["wrists"]),
        exercise("bench-press", "Bench press", Chest, &[Gym], &["shoulders"]),
        exercise("incline-dumbbell-press", "Incline dumbbell press", Chest, &[Gym, Home], &[]),
        exercise("pullup", "Pull-up", Back, &[Gym, PullupOnly], &["shoulders"]),
        exercise("bent-over-row", "Bent-over row", Back, &[Gym, Home], &["back"]),
        exercise("superman-hold", "Superman hold", Back, &[], &[]),
        exercise("squat", "Bodyweight squat", Legs, &[], &["knees"]),
        exercise("barbell-squat", "Barbell squat", Legs, &[Gym], &["knees", "back"]),
        exercise("lunge", "Walking lunge", Legs, &[], &["knees"]),
        exercise("glute-bridge", "Glute bridge", Legs, &[], &[]),
        exercise("overhead-press", "Overhead press", Shoulders, &[Gym], &["shoulders"]),
        exercise("lateral-raise", "Lateral raise", Shoulders, &[Gym, Home], &[]),
        exercise("pike-pushup", "Pike push-up", Shoulders, &[], &["wrists"]),
        exercise("bicep-curl", "Biceps curl", Arms, &[Gym, Home], &[]),
        exercise("chinup", "Chin-up", Arms, &[Gym, PullupOnly], &[]),
        exercise("tricep-dip", "Triceps dip", Arms, &[], &["shoulders"]),
        exercise("plank", "Plank", Core, &[], &[]),
        exercise("hanging-leg-raise", "Hanging leg raise", Core, &[Gym, PullupOnly], &[]),
        exercise("crunch", "Crunch", Core, &[], &["back"]),
    ]
}

//! Authorization and validation predicates
//!
//! These rules used to be re-implemented per screen; they live here so
//! every surface that exposes an operation checks the same predicate.
//! The store itself stays actor-agnostic.

use crate::catalog::ExerciseCatalog;
use fitcoach_shared::{Client, Exercise, WorkoutPlanExercise};

/// Whether the requesting client may remove a plan slot through the
/// client-facing path
///
/// Only self-authored slots qualify; trainer-authored slots go through the
/// trainer-facing deletion path.
pub fn can_remove_slot(requesting_client_id: &str, slot: &WorkoutPlanExercise) -> bool {
    slot.created_by.as_deref() == Some(requesting_client_id)
}

/// Contraindication tags shared between a client and an exercise
pub fn contraindication_conflicts(client: &Client, exercise: &Exercise) -> Vec<String> {
    exercise
        .avoid_if
        .iter()
        .filter(|tag| client.contraindications.contains(*tag))
        .cloned()
        .collect()
}

/// A flagged slot from a generated plan, with the offending tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContraindicationWarning {
    pub exercise_id: String,
    pub exercise_name: String,
    pub tags: Vec<String>,
}

/// Review a generated plan against a client's contraindications
///
/// The generator intentionally does not filter by contraindication; this is
/// the display-time pass that flags conflicting slots for human review.
pub fn flag_generated_plan(
    client: &Client,
    catalog: &ExerciseCatalog,
    plan: &[WorkoutPlanExercise],
) -> Vec<ContraindicationWarning> {
    plan.iter()
        .filter_map(|slot| {
            let exercise = catalog.get(&slot.exercise_id)?;
            let tags = contraindication_conflicts(client, exercise);
            if tags.is_empty() {
                None
            } else {
                Some(ContraindicationWarning {
                    exercise_id: exercise.id.clone(),
                    exercise_name: exercise.name.clone(),
                    tags,
                })
            }
        })
        .collect()
}

//! Workout generator
//!
//! Stateless heuristic producing candidate plan slots from the catalog.
//! Selection is randomized for variety but never leaves the requested
//! muscle groups or violates the equipment filter. Contraindications are
//! deliberately not consulted here; the displaying surface runs
//! [`crate::policy::flag_generated_plan`] over the result instead.

use crate::catalog::ExerciseCatalog;
use fitcoach_shared::{
    validation, Equipment, Exercise, GeneratorRequest, MuscleGroup, StoreError, StoreResult,
    WorkoutPlanExercise,
};
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use tracing::debug;

const DEFAULT_REPS: u32 = 10;

/// Exercises picked per requested muscle group, monotonic in duration
fn exercises_per_group(duration_minutes: u32) -> usize {
    match duration_minutes {
        0..=20 => 1,
        21..=40 => 2,
        41..=75 => 3,
        _ => 4,
    }
}

/// Default sets per slot; longer sessions get an extra set
fn default_sets(duration_minutes: u32) -> u32 {
    if duration_minutes >= 60 {
        4
    } else {
        3
    }
}

/// Whether an exercise is usable in the given equipment context
///
/// An exercise with no declared equipment tags works everywhere.
fn matches_equipment(exercise: &Exercise, context: Equipment) -> bool {
    exercise.equipment.is_empty() || exercise.equipment.contains(&context)
}

/// Produce a candidate list of plan slots for the request
///
/// Every requested muscle group with at least one usable candidate
/// contributes at least one slot; groups without candidates are skipped
/// silently (an empty plan is a valid, if unhelpful, outcome).
pub fn generate(
    catalog: &ExerciseCatalog,
    request: &GeneratorRequest,
) -> StoreResult<Vec<WorkoutPlanExercise>> {
    if request.muscle_groups.is_empty() {
        return Err(StoreError::Validation(
            "At least one muscle group is required".to_string(),
        ));
    }
    validation::validate_duration_minutes(request.duration_minutes)
        .map_err(StoreError::Validation)?;

    let per_group = exercises_per_group(request.duration_minutes);
    let sets = default_sets(request.duration_minutes);
    let mut rng = rand::thread_rng();

    // Partition usable candidates by muscle group; BTreeMap keeps group
    // order stable so only the within-group picks vary run to run.
    let mut by_group: BTreeMap<MuscleGroup, Vec<&Exercise>> = BTreeMap::new();
    for exercise in catalog.all() {
        if request.muscle_groups.contains(&exercise.muscle_group)
            && matches_equipment(exercise, request.equipment)
        {
            by_group.entry(exercise.muscle_group).or_default().push(exercise);
        }
    }

    let mut plan = Vec::new();
    for (group, mut candidates) in by_group {
        candidates.shuffle(&mut rng);
        let take = per_group.min(candidates.len());
        debug!(?group, candidates = candidates.len(), take, "group selection");
        for exercise in candidates.into_iter().take(take) {
            plan.push(WorkoutPlanExercise {
                exercise_id: exercise.id.clone(),
                sets,
                reps: DEFAULT_REPS,
                created_by: None,
            });
        }
    }

    Ok(plan)
}

/// Pick a replacement exercise for one slot
///
/// The replacement comes from the same muscle group and equipment context,
/// excluding the current exercise and anything already present elsewhere in
/// the result set. `None` means no alternative exists and the caller must
/// leave the original slot unchanged.
pub fn pick_alternative(
    catalog: &ExerciseCatalog,
    equipment: Equipment,
    current_exercise_id: &str,
    muscle_group: MuscleGroup,
    taken: &[WorkoutPlanExercise],
) -> Option<Exercise> {
    let mut candidates: Vec<&Exercise> = catalog
        .by_muscle_group(muscle_group)
        .filter(|e| matches_equipment(e, equipment))
        .filter(|e| e.id != current_exercise_id)
        .filter(|e| !taken.iter().any(|slot| slot.exercise_id == e.id))
        .collect();

    candidates.shuffle(&mut rand::thread_rng());
    candidates.first().map(|e| (*e).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(40, 2)]
    #[case(41, 3)]
    #[case(75, 3)]
    #[case(76, 4)]
    #[case(240, 4)]
    fn per_group_count_boundaries(#[case] minutes: u32, #[case] expected: usize) {
        assert_eq!(exercises_per_group(minutes), expected);
    }

    fn request(groups: &[MuscleGroup], duration: u32, equipment: Equipment) -> GeneratorRequest {
        GeneratorRequest {
            muscle_groups: groups.iter().copied().collect(),
            duration_minutes: duration,
            equipment,
        }
    }

    #[test]
    fn rejects_empty_muscle_group_set() {
        let catalog = ExerciseCatalog::seed();
        let result = generate(&catalog, &request(&[], 45, Equipment::Gym));
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn every_slot_stays_in_requested_groups() {
        let catalog = ExerciseCatalog::seed();
        let req = request(&[MuscleGroup::Legs, MuscleGroup::Core], 45, Equipment::Gym);
        for _ in 0..20 {
            let plan = generate(&catalog, &req).unwrap();
            assert!(!plan.is_empty());
            for slot in &plan {
                let exercise = catalog.get(&slot.exercise_id).unwrap();
                assert!(req.muscle_groups.contains(&exercise.muscle_group));
            }
        }
    }

    #[test]
    fn equipment_filter_is_never_violated() {
        let catalog = ExerciseCatalog::seed();
        let req = request(&MuscleGroup::ALL, 60, Equipment::PullupOnly);
        for _ in 0..20 {
            let plan = generate(&catalog, &req).unwrap();
            for slot in &plan {
                let exercise = catalog.get(&slot.exercise_id).unwrap();
                assert!(
                    exercise.equipment.is_empty()
                        || exercise.equipment.contains(&Equipment::PullupOnly),
                    "{} requires equipment outside the context",
                    exercise.id
                );
            }
        }
    }

    #[test]
    fn at_least_one_slot_per_group_with_candidates() {
        let catalog = ExerciseCatalog::seed();
        let req = request(&MuscleGroup::ALL, 15, Equipment::Home);
        let plan = generate(&catalog, &req).unwrap();

        let covered: HashSet<MuscleGroup> = plan
            .iter()
            .map(|slot| catalog.get(&slot.exercise_id).unwrap().muscle_group)
            .collect();
        for group in MuscleGroup::ALL {
            let has_candidate = catalog
                .by_muscle_group(group)
                .any(|e| matches_equipment(e, Equipment::Home));
            if has_candidate {
                assert!(covered.contains(&group), "group {group:?} missing");
            }
        }
    }

    #[test]
    fn no_duplicate_slots_in_a_plan() {
        let catalog = ExerciseCatalog::seed();
        let plan = generate(&catalog, &request(&MuscleGroup::ALL, 90, Equipment::Gym)).unwrap();
        let mut ids: Vec<&str> = plan.iter().map(|s| s.exercise_id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn longer_sessions_get_an_extra_set() {
        let catalog = ExerciseCatalog::seed();
        let short = generate(&catalog, &request(&[MuscleGroup::Legs], 30, Equipment::Gym)).unwrap();
        let long = generate(&catalog, &request(&[MuscleGroup::Legs], 90, Equipment::Gym)).unwrap();
        assert!(short.iter().all(|s| s.sets == 3));
        assert!(long.iter().all(|s| s.sets == 4));
    }

    #[test]
    fn alternative_excludes_current_and_taken() {
        let catalog = ExerciseCatalog::seed();
        let taken = vec![
            WorkoutPlanExercise {
                exercise_id: "squat".into(),
                sets: 3,
                reps: 10,
                created_by: None,
            },
            WorkoutPlanExercise {
                exercise_id: "lunge".into(),
                sets: 3,
                reps: 10,
                created_by: None,
            },
        ];
        for _ in 0..20 {
            let alt = pick_alternative(&catalog, Equipment::Home, "squat", MuscleGroup::Legs, &taken);
            let alt = alt.expect("seed has more than two home leg exercises");
            assert_ne!(alt.id, "squat");
            assert!(!taken.iter().any(|s| s.exercise_id == alt.id));
            assert_eq!(alt.muscle_group, MuscleGroup::Legs);
        }
    }

    #[test]
    fn alternative_is_absent_when_group_is_exhausted() {
        let catalog = ExerciseCatalog::seed();
        // Claim every home-usable leg exercise except the current one
        let taken: Vec<WorkoutPlanExercise> = catalog
            .by_muscle_group(MuscleGroup::Legs)
            .filter(|e| matches_equipment(e, Equipment::Home))
            .map(|e| WorkoutPlanExercise {
                exercise_id: e.id.clone(),
                sets: 3,
                reps: 10,
                created_by: None,
            })
            .collect();
        let alt = pick_alternative(&catalog, Equipment::Home, "squat", MuscleGroup::Legs, &taken);
        assert!(alt.is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn per_group_count_is_monotonic_in_duration(a in 1u32..=240, b in 1u32..=240) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(exercises_per_group(lo) <= exercises_per_group(hi));
        }

        #[test]
        fn generated_plan_respects_filters(duration in 1u32..=240) {
            let catalog = ExerciseCatalog::seed();
            let req = request(&[MuscleGroup::Chest, MuscleGroup::Arms], duration, Equipment::Home);
            let plan = generate(&catalog, &req).unwrap();
            for slot in plan {
                let exercise = catalog.get(&slot.exercise_id).unwrap();
                prop_assert!(req.muscle_groups.contains(&exercise.muscle_group));
                prop_assert!(matches_equipment(exercise, Equipment::Home));
            }
        }
    }
}

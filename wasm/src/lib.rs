//! Fitcoach WASM Module
//!
//! WebAssembly bindings for the progress widgets that render inside the
//! Mini App without a round trip to the core. Dates cross the boundary as
//! day numbers (days since the Unix epoch) so no date library is needed
//! on either side.

use wasm_bindgen::prelude::*;

/// Current workout streak in days
///
/// `workout_days` holds the day numbers of completed workouts in any order,
/// duplicates allowed. A streak counts consecutive days ending today or
/// yesterday; anything older scores zero.
#[wasm_bindgen]
pub fn current_streak_days(workout_days: &[i32], today: i32) -> u32 {
    let mut days: Vec<i32> = workout_days.to_vec();
    days.sort_unstable();
    days.dedup();

    let latest = match days.last() {
        Some(&d) => d,
        None => return 0,
    };
    if latest < today - 1 {
        return 0;
    }

    let mut streak = 0u32;
    let mut expected = latest;
    for &day in days.iter().rev() {
        if day != expected {
            break;
        }
        streak += 1;
        expected -= 1;
    }
    streak
}

/// Share of planned sets actually performed, in `0.0..=1.0`
#[wasm_bindgen]
pub fn completion_rate(completed_sets: u32, planned_sets: u32) -> f64 {
    if planned_sets == 0 {
        return 0.0;
    }
    (completed_sets.min(planned_sets) as f64) / planned_sets as f64
}

/// Total repetitions scheduled for the week
///
/// `sets` and `reps` are parallel per-slot arrays; extra entries in the
/// longer one are ignored.
#[wasm_bindgen]
pub fn weekly_volume(sets: &[u32], reps: &[u32]) -> u32 {
    sets.iter()
        .zip(reps.iter())
        .map(|(s, r)| s.saturating_mul(*r))
        .fold(0u32, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_counts_back_from_today() {
        assert_eq!(current_streak_days(&[100, 99, 98], 100), 3);
    }

    #[test]
    fn streak_survives_a_missed_today() {
        assert_eq!(current_streak_days(&[99, 98], 100), 2);
    }

    #[test]
    fn streak_breaks_after_two_idle_days() {
        assert_eq!(current_streak_days(&[97, 96], 100), 0);
    }

    #[test]
    fn streak_ignores_order_and_duplicates() {
        assert_eq!(current_streak_days(&[98, 100, 99, 100], 100), 3);
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(current_streak_days(&[], 100), 0);
    }

    #[test]
    fn rate_is_clamped_and_zero_safe() {
        assert!((completion_rate(3, 4) - 0.75).abs() < 1e-9);
        assert!((completion_rate(9, 4) - 1.0).abs() < 1e-9);
        assert_eq!(completion_rate(3, 0), 0.0);
    }

    #[test]
    fn volume_is_the_dot_product_of_sets_and_reps() {
        assert_eq!(weekly_volume(&[3, 4], &[10, 8]), 62);
        assert_eq!(weekly_volume(&[3, 4, 5], &[10]), 30);
        assert_eq!(weekly_volume(&[], &[]), 0);
    }
}

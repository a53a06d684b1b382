//! Request and update types shared between the store and its callers

use crate::models::{Equipment, FitnessLevel, MuscleGroup};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Partial update merged into an existing client
///
/// Only `Some` fields are applied; everything else is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<FitnessLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Equipment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_trainer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_first_login: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer_notes: Option<String>,
}

/// Input for the workout generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorRequest {
    /// Target muscle groups; must be non-empty
    pub muscle_groups: HashSet<MuscleGroup>,
    pub duration_minutes: u32,
    pub equipment: Equipment,
}

/// Derived workout statistics for a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    /// Consecutive calendar days ending today (or yesterday) with a workout
    pub current_streak_days: u32,
    /// Share of recorded sets marked completed, 0.0 when nothing recorded
    pub completion_rate: f64,
    pub total_duration_minutes: u32,
}

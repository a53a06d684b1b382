//! Fitcoach Shared Library
//!
//! This crate contains the domain types, error taxonomy, and validation
//! helpers shared between the core, the Mini App shell, and the WASM module.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::{StoreError, StoreResult};
pub use models::{
    Client, CoachingRequest, CompletedWorkoutSummary, Equipment, Exercise, FitnessLevel, Mood,
    MuscleGroup, PerformedExercise, PerformedSet, RequestStatus, Role, Weekday,
    WorkoutHistoryEntry, WorkoutPlanExercise, WorkoutProgram,
};
pub use types::{ClientUpdate, GeneratorRequest, WorkoutStats};

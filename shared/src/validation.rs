//! Input validation functions
//!
//! Plain validators used by the store and the generator before any state is
//! touched. Each returns a message the UI can show verbatim.

use crate::models::WorkoutProgram;

/// Validate a planned set count
pub fn validate_sets(sets: u32) -> Result<(), String> {
    if sets == 0 {
        return Err("Sets must be at least 1".to_string());
    }
    if sets > 20 {
        return Err("Sets value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a planned rep count
pub fn validate_reps(reps: u32) -> Result<(), String> {
    if reps == 0 {
        return Err("Reps must be at least 1".to_string());
    }
    if reps > 100 {
        return Err("Reps value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a requested workout duration in minutes
pub fn validate_duration_minutes(minutes: u32) -> Result<(), String> {
    if minutes == 0 {
        return Err("Duration must be at least 1 minute".to_string());
    }
    if minutes > 240 {
        return Err("Duration cannot exceed 4 hours".to_string());
    }
    Ok(())
}

/// Validate a client display name
pub fn validate_display_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.len() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate a contraindication tag (lowercase word, e.g. "knees", "back")
pub fn validate_contraindication_tag(tag: &str) -> Result<(), String> {
    if tag.is_empty() {
        return Err("Tag cannot be empty".to_string());
    }
    if tag.len() > 40 {
        return Err("Tag too long".to_string());
    }
    if !tag.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
        return Err("Tag must be lowercase ascii words".to_string());
    }
    Ok(())
}

/// Validate a program template before it is offered for application
pub fn validate_program(program: &WorkoutProgram) -> Result<(), String> {
    if program.duration_weeks == 0 {
        return Err("Program must run for at least one week".to_string());
    }
    if program.sessions_per_week == 0 || program.sessions_per_week > 7 {
        return Err("Sessions per week must be between 1 and 7".to_string());
    }
    if program.exercises.is_empty() {
        return Err("Program must contain at least one exercise".to_string());
    }
    Ok(())
}

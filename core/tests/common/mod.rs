//! Common test utilities for integration tests
//!
//! Builds an [`AppState`] over the in-memory gateway and a recording relay
//! so tests can assert on both local state and mirror traffic.

use fake::faker::name::en::Name;
use fake::Fake;
use fitcoach_core::catalog::ExerciseCatalog;
use fitcoach_core::config::AppConfig;
use fitcoach_core::gateway::{MemoryGateway, PersistenceGateway};
use fitcoach_core::notify::{NotificationRelay, RecordingRelay};
use fitcoach_core::state::AppState;
use fitcoach_shared::{Client, WorkoutPlanExercise};
use std::sync::Arc;

/// Test application wrapper
pub struct TestState {
    pub state: AppState,
    pub gateway: Arc<MemoryGateway>,
    pub relay: Arc<RecordingRelay>,
}

impl TestState {
    pub fn new() -> Self {
        let gateway = Arc::new(MemoryGateway::new());
        let relay = Arc::new(RecordingRelay::new());
        let state = AppState::with_collaborators(
            AppConfig::default(),
            Arc::new(ExerciseCatalog::seed()),
            Arc::clone(&gateway) as Arc<dyn PersistenceGateway>,
            Arc::clone(&relay) as Arc<dyn NotificationRelay>,
        );
        Self {
            state,
            gateway,
            relay,
        }
    }

    /// Register a client with a random display name
    pub fn add_client(&mut self, id: &str) -> Client {
        let client = Client::new(id, Name().fake::<String>());
        assert!(self.state.store.add_client(client.clone()));
        client
    }

    /// Let spawned mirror tasks run to completion on the test runtime
    pub async fn drain_mirrors(&self) {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }
}

pub fn slot(exercise_id: &str) -> WorkoutPlanExercise {
    WorkoutPlanExercise {
        exercise_id: exercise_id.into(),
        sets: 3,
        reps: 10,
        created_by: None,
    }
}

pub fn slot_by(exercise_id: &str, created_by: &str) -> WorkoutPlanExercise {
    WorkoutPlanExercise {
        exercise_id: exercise_id.into(),
        sets: 3,
        reps: 10,
        created_by: Some(created_by.into()),
    }
}

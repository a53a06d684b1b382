//! Fitcoach Core Library
//!
//! Domain core of the trainer/client coaching Mini App.
//!
//! ## Architecture
//!
//! - Domain store: in-memory authority for clients, catalog, and programs
//! - Generator: stateless workout-suggestion heuristic
//! - Coaching: client -> trainer handshake state machine
//! - Gateway/Notify: narrow interfaces to the remote table store and the
//!   chat platform; both best-effort, fire-and-forget

pub mod catalog;
pub mod coaching;
pub mod config;
pub mod error;
pub mod gateway;
pub mod generator;
pub mod notify;
pub mod policy;
pub mod state;
pub mod store;
pub mod telemetry;

pub use catalog::ExerciseCatalog;
pub use coaching::CoachingRequestStore;
pub use state::AppState;
pub use store::DomainStore;

//! Persistence gateway
//!
//! Row-oriented access to the remote system of record. The domain store is
//! the in-memory authority for the session; writes through this trait are
//! best-effort mirrors, not transactions.

pub mod memory;
pub mod supabase;

pub use memory::MemoryGateway;
pub use supabase::SupabaseGateway;

use crate::error::GatewayError;
use async_trait::async_trait;
use serde_json::Value;

/// Named collections in the remote store
pub mod collections {
    pub const CLIENTS: &str = "clients";
    pub const PROFILES: &str = "profiles";
    pub const TELEGRAM_USERS: &str = "telegram_users";
    pub const COACHING_REQUESTS: &str = "coaching_requests";
    pub const EXERCISES: &str = "exercises";
}

/// Row-oriented operations against named collections keyed by a string id
///
/// All values are JSON-compatible; complex sub-objects (weekly plan, history)
/// travel as opaque structured columns inside the row.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Insert the row or replace an existing one with the same id
    async fn upsert(&self, collection: &str, id: &str, row: Value) -> Result<(), GatewayError>;

    /// Merge the given columns into the row with the given id
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), GatewayError>;

    /// Delete the row with the given id (idempotent)
    async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError>;

    /// Select rows, optionally filtered by column equality
    async fn select(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<Value>, GatewayError>;
}

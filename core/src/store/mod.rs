//! Domain store
//!
//! Single source of truth for the session: client roster, exercise catalog,
//! program templates, and the active-client selection. Mutations apply to
//! the in-memory state immediately and mirror the affected row to the
//! persistence gateway fire-and-forget; a failed remote write leaves local
//! state ahead of the remote copy and is only logged.
//!
//! The store has no notion of a "current actor". Authorization predicates
//! such as who may remove a plan slot live in [`crate::policy`] and must be
//! checked by every surface that exposes the corresponding operation.

mod clients;
mod history;
mod plan;

pub use history::streak_days;

use crate::catalog::ExerciseCatalog;
use crate::gateway::{collections, PersistenceGateway};
use crate::notify::NotificationRelay;
use fitcoach_shared::{Client, StoreError, StoreResult, WorkoutProgram};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct DomainStore {
    clients: Vec<Client>,
    programs: Vec<WorkoutProgram>,
    catalog: Arc<ExerciseCatalog>,
    active_client_id: Option<String>,
    gateway: Arc<dyn PersistenceGateway>,
    relay: Arc<dyn NotificationRelay>,
}

impl DomainStore {
    pub fn new(
        catalog: Arc<ExerciseCatalog>,
        gateway: Arc<dyn PersistenceGateway>,
        relay: Arc<dyn NotificationRelay>,
    ) -> Self {
        Self {
            clients: Vec::new(),
            programs: Vec::new(),
            catalog,
            active_client_id: None,
            gateway,
            relay,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn programs(&self) -> &[WorkoutProgram] {
        &self.programs
    }

    pub fn program(&self, id: &str) -> Option<&WorkoutProgram> {
        self.programs.iter().find(|p| p.id == id)
    }

    pub fn active_client(&self) -> Option<&Client> {
        self.active_client_id
            .as_deref()
            .and_then(|id| self.client(id))
    }

    // ------------------------------------------------------------------
    // Session plumbing
    // ------------------------------------------------------------------

    /// Set the active client; signals `NotFound` and changes nothing when
    /// the id is not in the loaded roster
    pub fn select_client(&mut self, id: &str) -> StoreResult<()> {
        if self.client(id).is_none() {
            return Err(StoreError::not_found("client", id));
        }
        self.active_client_id = Some(id.to_string());
        debug!(client_id = id, "active client selected");
        Ok(())
    }

    /// Replace program templates (reference data, loaded at startup)
    pub fn set_programs(&mut self, programs: Vec<WorkoutProgram>) {
        self.programs = programs;
    }

    /// Re-fetch the roster from the remote store, discarding any local
    /// state the fire-and-forget mirror has not persisted
    pub async fn reload_from_remote(&mut self) -> Result<usize, crate::error::GatewayError> {
        let rows = self.gateway.select(collections::CLIENTS, None).await?;
        let mut clients = Vec::with_capacity(rows.len());
        for row in rows {
            let client: Client = serde_json::from_value(row).map_err(|source| {
                crate::error::GatewayError::Decode {
                    collection: collections::CLIENTS.to_string(),
                    source,
                }
            })?;
            clients.push(client);
        }
        let count = clients.len();
        self.clients = clients;
        if let Some(active) = self.active_client_id.clone() {
            if self.client(&active).is_none() {
                self.active_client_id = None;
            }
        }
        info!(count, "roster reloaded from remote");
        Ok(count)
    }

    /// Send a text notification to the client's linked chat; a silent no-op
    /// when the client has no linked identity
    pub fn notify_client(&self, client_id: &str, text: &str) -> StoreResult<()> {
        let client = self
            .client(client_id)
            .ok_or_else(|| StoreError::not_found("client", client_id))?;

        let chat_id = match (&client.telegram_chat_id, client.telegram_linked) {
            (Some(chat_id), true) => chat_id.clone(),
            _ => {
                debug!(client_id, "client has no linked chat; notification dropped");
                return Ok(());
            }
        };

        let relay = Arc::clone(&self.relay);
        let text = text.to_string();
        Self::fire_and_forget(async move {
            if let Err(err) = relay.send_message(&chat_id, &text).await {
                warn!(chat_id, error = %err, "notification delivery failed");
            }
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals shared by the mutation modules
    // ------------------------------------------------------------------

    pub(crate) fn client_mut(&mut self, id: &str) -> StoreResult<&mut Client> {
        self.clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    /// Mirror the full client row to the remote store, fire-and-forget
    pub(crate) fn mirror_client(&self, client: &Client) {
        let row = match serde_json::to_value(client) {
            Ok(row) => row,
            Err(err) => {
                warn!(client_id = %client.id, error = %err, "client row not serializable; mirror skipped");
                return;
            }
        };
        let gateway = Arc::clone(&self.gateway);
        let id = client.id.clone();
        Self::fire_and_forget(async move {
            if let Err(err) = gateway.upsert(collections::CLIENTS, &id, row).await {
                warn!(client_id = %id, error = %err, "remote sync failed; local state is ahead of remote");
            }
        });
    }

    /// Mirror a row deletion, fire-and-forget
    pub(crate) fn mirror_delete(&self, collection: &'static str, id: &str) {
        let gateway = Arc::clone(&self.gateway);
        let id = id.to_string();
        Self::fire_and_forget(async move {
            if let Err(err) = gateway.delete(collection, &id).await {
                warn!(collection, %id, error = %err, "remote delete failed; local state is ahead of remote");
            }
        });
    }

    /// Spawn a remote side effect without blocking the mutation
    ///
    /// Outside an async runtime (pure-sync tests) the side effect is dropped;
    /// the in-memory mutation has already been applied either way.
    fn fire_and_forget<F>(task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(_) => debug!("no async runtime; remote mirror skipped"),
        }
    }
}

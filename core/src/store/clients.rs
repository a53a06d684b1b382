//! Roster mutations: registration, profile merges, removal, chat linkage

use super::DomainStore;
use crate::gateway::collections;
use fitcoach_shared::{Client, ClientUpdate, StoreError, StoreResult};
use tracing::{debug, info};

impl DomainStore {
    /// Append a client to the roster; idempotent by id
    ///
    /// Returns `true` when the client was added, `false` when a client with
    /// the same id was already loaded (the existing entry is kept as-is).
    pub fn add_client(&mut self, client: Client) -> bool {
        if self.client(&client.id).is_some() {
            debug!(client_id = %client.id, "add_client ignored; id already in roster");
            return false;
        }
        info!(client_id = %client.id, "client added to roster");
        self.mirror_client(&client);
        self.clients.push(client);
        true
    }

    /// Merge partial fields into the matching client
    pub fn update_client(&mut self, id: &str, update: ClientUpdate) -> StoreResult<&Client> {
        let client = self.client_mut(id)?;

        if let Some(name) = update.name {
            fitcoach_shared::validation::validate_display_name(&name)
                .map_err(StoreError::Validation)?;
            client.name = name;
        }
        if let Some(age) = update.age {
            client.age = Some(age);
        }
        if let Some(goal) = update.goal {
            client.goal = Some(goal);
        }
        if let Some(level) = update.fitness_level {
            client.fitness_level = Some(level);
        }
        if let Some(equipment) = update.equipment {
            client.equipment = equipment;
        }
        if let Some(contraindications) = update.contraindications {
            client.contraindications = contraindications;
        }
        if let Some(trainer_id) = update.assigned_trainer_id {
            client.assigned_trainer_id = Some(trainer_id);
        }
        if let Some(first_login) = update.is_first_login {
            client.is_first_login = first_login;
        }
        if let Some(notes) = update.trainer_notes {
            client.trainer_notes = notes;
        }

        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        // Re-borrow immutably for the caller
        self.client(id)
            .ok_or_else(|| StoreError::not_found("client", id))
    }

    /// Explicit trainer-initiated removal; cascades deletion to the remote
    /// `clients` and `profiles` rows
    pub fn remove_client(&mut self, id: &str) -> StoreResult<()> {
        let position = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("client", id))?;
        self.clients.remove(position);
        if self.active_client_id.as_deref() == Some(id) {
            self.active_client_id = None;
        }
        self.mirror_delete(collections::CLIENTS, id);
        self.mirror_delete(collections::PROFILES, id);
        info!(client_id = id, "client removed; remote rows scheduled for deletion");
        Ok(())
    }

    /// Record the external chat identity without confirming the link
    /// (the webhook relay learned the chat id, the client has not accepted)
    pub fn bind_telegram(&mut self, id: &str, chat_id: &str) -> StoreResult<()> {
        let client = self.client_mut(id)?;
        client.telegram_chat_id = Some(chat_id.to_string());
        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        Ok(())
    }

    /// Link the chat identity; idempotent
    pub fn link_telegram(&mut self, id: &str, chat_id: &str) -> StoreResult<()> {
        let client = self.client_mut(id)?;
        client.telegram_chat_id = Some(chat_id.to_string());
        client.telegram_linked = true;
        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        debug!(client_id = id, chat_id, "telegram linked");
        Ok(())
    }

    /// Clear the chat identity; idempotent
    pub fn unlink_telegram(&mut self, id: &str) -> StoreResult<()> {
        let client = self.client_mut(id)?;
        client.telegram_chat_id = None;
        client.telegram_linked = false;
        let snapshot = client.clone();
        self.mirror_client(&snapshot);
        debug!(client_id = id, "telegram unlinked");
        Ok(())
    }
}

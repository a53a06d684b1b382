//! Coaching request store
//!
//! Small state machine mediating the client -> trainer relationship
//! handshake: `pending -> {accepted, rejected}`, both terminal for that
//! request. Independent of the domain store.

use crate::gateway::{collections, PersistenceGateway};
use chrono::Utc;
use fitcoach_shared::{CoachingRequest, RequestStatus};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct CoachingRequestStore {
    requests: Vec<CoachingRequest>,
    gateway: Arc<dyn PersistenceGateway>,
}

impl CoachingRequestStore {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            requests: Vec::new(),
            gateway,
        }
    }

    pub fn requests(&self) -> &[CoachingRequest] {
        &self.requests
    }

    pub fn request(&self, id: &str) -> Option<&CoachingRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Create a request for the pair, or return the existing active one
    ///
    /// At most one active (pending or accepted) request exists per
    /// (client, trainer) pair; re-requesting after a rejection creates a
    /// fresh pending entity.
    pub fn create_request(&mut self, client_id: &str, trainer_id: &str) -> CoachingRequest {
        if let Some(existing) = self
            .requests
            .iter()
            .find(|r| r.client_id == client_id && r.trainer_id == trainer_id && r.status.is_active())
        {
            debug!(client_id, trainer_id, request_id = %existing.id, "active request already exists");
            return existing.clone();
        }

        let request = CoachingRequest {
            id: Uuid::new_v4().to_string(),
            client_id: client_id.to_string(),
            trainer_id: trainer_id.to_string(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        info!(client_id, trainer_id, request_id = %request.id, "coaching request created");
        self.mirror(&request);
        self.requests.push(request.clone());
        request
    }

    /// Transition a pending request to accepted; no-op for unknown ids or
    /// requests already in a terminal state
    pub fn accept_request(&mut self, id: &str) -> Option<CoachingRequest> {
        self.transition(id, RequestStatus::Accepted)
    }

    /// Transition a pending request to rejected; no-op like `accept_request`
    pub fn reject_request(&mut self, id: &str) -> Option<CoachingRequest> {
        self.transition(id, RequestStatus::Rejected)
    }

    fn transition(&mut self, id: &str, to: RequestStatus) -> Option<CoachingRequest> {
        let request = self.requests.iter_mut().find(|r| r.id == id)?;
        if request.status != RequestStatus::Pending {
            debug!(request_id = id, status = ?request.status, "transition ignored; request is terminal");
            return None;
        }
        request.status = to;
        let snapshot = request.clone();
        info!(request_id = id, status = ?to, "coaching request transitioned");
        self.mirror(&snapshot);
        Some(snapshot)
    }

    /// Hard reset: delete every request for the client, regardless of status
    ///
    /// This also forgets rejection history; that is the contract, not an
    /// oversight.
    pub fn cancel_requests_for_client(&mut self, client_id: &str) -> usize {
        let removed: Vec<CoachingRequest> = self
            .requests
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect();
        self.requests.retain(|r| r.client_id != client_id);
        for request in &removed {
            self.mirror_delete(&request.id);
        }
        if !removed.is_empty() {
            info!(client_id, count = removed.len(), "coaching requests cancelled");
        }
        removed.len()
    }

    /// The request that currently defines the client's coaching state
    ///
    /// Accepted wins over pending if both somehow coexist; rejected
    /// requests are never returned.
    pub fn request_for_client(&self, client_id: &str) -> Option<&CoachingRequest> {
        let mine = || self.requests.iter().filter(|r| r.client_id == client_id);
        mine()
            .find(|r| r.status == RequestStatus::Accepted)
            .or_else(|| mine().find(|r| r.status == RequestStatus::Pending))
    }

    fn mirror(&self, request: &CoachingRequest) {
        let row = match serde_json::to_value(request) {
            Ok(row) => row,
            Err(err) => {
                warn!(request_id = %request.id, error = %err, "request row not serializable; mirror skipped");
                return;
            }
        };
        let gateway = Arc::clone(&self.gateway);
        let id = request.id.clone();
        fire_and_forget(async move {
            if let Err(err) = gateway.upsert(collections::COACHING_REQUESTS, &id, row).await {
                warn!(request_id = %id, error = %err, "remote sync failed; local state is ahead of remote");
            }
        });
    }

    fn mirror_delete(&self, id: &str) {
        let gateway = Arc::clone(&self.gateway);
        let id = id.to_string();
        fire_and_forget(async move {
            if let Err(err) = gateway.delete(collections::COACHING_REQUESTS, &id).await {
                warn!(request_id = %id, error = %err, "remote delete failed; local state is ahead of remote");
            }
        });
    }
}

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

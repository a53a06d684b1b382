//! In-memory gateway used by tests and offline development
//!
//! Keeps rows in a plain map and records every call so tests can assert on
//! the mirror traffic the store produces.

use crate::error::GatewayError;
use crate::gateway::PersistenceGateway;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// A call observed by the memory gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Upsert { collection: String, id: String },
    Update { collection: String, id: String },
    Delete { collection: String, id: String },
}

#[derive(Default)]
struct Inner {
    rows: HashMap<(String, String), Value>,
    calls: Vec<GatewayCall>,
}

/// Map-backed [`PersistenceGateway`]
#[derive(Default)]
pub struct MemoryGateway {
    inner: Mutex<Inner>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a row, e.g. remote state present before a reload
    pub fn put(&self, collection: &str, id: &str, row: Value) {
        let mut inner = self.inner.lock().expect("gateway lock");
        inner
            .rows
            .insert((collection.to_string(), id.to_string()), row);
    }

    pub fn row(&self, collection: &str, id: &str) -> Option<Value> {
        let inner = self.inner.lock().expect("gateway lock");
        inner
            .rows
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.lock().expect("gateway lock").calls.clone()
    }

    pub fn row_count(&self, collection: &str) -> usize {
        let inner = self.inner.lock().expect("gateway lock");
        inner.rows.keys().filter(|(c, _)| c == collection).count()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn upsert(&self, collection: &str, id: &str, row: Value) -> Result<(), GatewayError> {
        let mut inner = self.inner.lock().expect("gateway lock");
        inner
            .rows
            .insert((collection.to_string(), id.to_string()), row);
        inner.calls.push(GatewayCall::Upsert {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), GatewayError> {
        let mut inner = self.inner.lock().expect("gateway lock");
        let key = (collection.to_string(), id.to_string());
        if let Some(row) = inner.rows.get_mut(&key) {
            if let (Some(row_map), Some(patch_map)) = (row.as_object_mut(), patch.as_object()) {
                for (column, value) in patch_map {
                    row_map.insert(column.clone(), value.clone());
                }
            }
        }
        inner.calls.push(GatewayCall::Update {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        let mut inner = self.inner.lock().expect("gateway lock");
        inner
            .rows
            .remove(&(collection.to_string(), id.to_string()));
        inner.calls.push(GatewayCall::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }

    async fn select(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<Value>, GatewayError> {
        let inner = self.inner.lock().expect("gateway lock");
        let rows = inner
            .rows
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|(_, row)| row)
            .filter(|row| match filter {
                Some((column, value)) => row
                    .get(column)
                    .map(|v| v.as_str() == Some(value) || v.to_string() == value)
                    .unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect();
        Ok(rows)
    }
}

//! Supabase (PostgREST) gateway implementation

use crate::config::SupabaseConfig;
use crate::error::GatewayError;
use crate::gateway::PersistenceGateway;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

/// Gateway speaking the PostgREST conventions of a Supabase project
///
/// Rows are addressed as `{base}/{collection}?id=eq.{id}`; upserts use the
/// `resolution=merge-duplicates` preference so a re-sent row replaces the
/// previous copy instead of conflicting.
pub struct SupabaseGateway {
    http: reqwest::Client,
    base_url: String,
}

impl SupabaseGateway {
    pub fn new(config: &SupabaseConfig) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&config.api_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", config.api_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Rejected { status, body })
    }
}

#[async_trait]
impl PersistenceGateway for SupabaseGateway {
    async fn upsert(&self, collection: &str, id: &str, row: Value) -> Result<(), GatewayError> {
        debug!(collection, id, "upserting row");
        let response = self
            .http
            .post(self.collection_url(collection))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), GatewayError> {
        debug!(collection, id, "updating row");
        let response = self
            .http
            .patch(self.collection_url(collection))
            .query(&[("id", format!("eq.{id}"))])
            .json(&patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        debug!(collection, id, "deleting row");
        let response = self
            .http
            .delete(self.collection_url(collection))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn select(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<Value>, GatewayError> {
        let mut request = self
            .http
            .get(self.collection_url(collection))
            .query(&[("select", "*")]);
        if let Some((column, value)) = filter {
            request = request.query(&[(column, format!("eq.{value}"))]);
        }
        let response = Self::check(request.send().await?).await?;
        let rows: Vec<Value> = response.json().await?;
        Ok(rows)
    }
}

//! Collaborator error handling
//!
//! Errors from the persistence gateway and the notification relay. Both are
//! fire-and-forget from the store's point of view: a failure here is logged
//! and the local mutation stands (local state ahead of remote state).

use thiserror::Error;

/// Persistence gateway error
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote store rejected the write: {status} {body}")]
    Rejected { status: u16, body: String },

    #[error("Malformed row in collection {collection}: {source}")]
    Decode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Notification relay error
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Chat platform rejected the message: {status} {body}")]
    Rejected { status: u16, body: String },
}

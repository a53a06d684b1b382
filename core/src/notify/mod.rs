//! Notification relay
//!
//! Sends a text message to a client's linked external chat identity.
//! Fire-and-forget: failures are logged by the caller, never surfaced to
//! the mutation that triggered them.

pub mod telegram;

pub use telegram::TelegramRelay;

use crate::error::RelayError;
use async_trait::async_trait;
use std::sync::Mutex;

#[async_trait]
pub trait NotificationRelay: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), RelayError>;
}

/// Relay that drops every message; used when notifications are disabled
#[derive(Default)]
pub struct NoopRelay;

#[async_trait]
impl NotificationRelay for NoopRelay {
    async fn send_message(&self, _chat_id: &str, _text: &str) -> Result<(), RelayError> {
        Ok(())
    }
}

/// Relay that records messages for test assertions
#[derive(Default)]
pub struct RecordingRelay {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().expect("relay lock").clone()
    }
}

#[async_trait]
impl NotificationRelay for RecordingRelay {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), RelayError> {
        self.messages
            .lock()
            .expect("relay lock")
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_relay_captures_messages() {
        let relay = RecordingRelay::new();
        relay.send_message("123", "workout ready").await.unwrap();
        assert_eq!(relay.messages(), vec![("123".into(), "workout ready".into())]);
    }

    #[tokio::test]
    async fn noop_relay_always_succeeds() {
        assert!(NoopRelay.send_message("123", "hi").await.is_ok());
    }
}

//! Telegram Bot API relay

use crate::config::TelegramConfig;
use crate::error::RelayError;
use crate::notify::NotificationRelay;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Relay posting to `{api_base}/bot{token}/sendMessage`
pub struct TelegramRelay {
    http: reqwest::Client,
    send_message_url: String,
}

impl TelegramRelay {
    pub fn new(config: &TelegramConfig) -> Self {
        let base = config.api_base.trim_end_matches('/');
        Self {
            http: reqwest::Client::new(),
            send_message_url: format!("{}/bot{}/sendMessage", base, config.bot_token),
        }
    }
}

#[async_trait]
impl NotificationRelay for TelegramRelay {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), RelayError> {
        debug!(chat_id, "sending telegram notification");
        let response = self
            .http
            .post(&self.send_message_url)
            .json(&SendMessageBody { chat_id, text })
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(RelayError::Rejected { status, body })
    }
}

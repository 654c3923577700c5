//! Telegram Bot API notifier

use super::{NotificationError, Notifier};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    api_url: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self::with_api_url(bot_token, chat_id, DEFAULT_API_URL)
    }

    pub fn with_api_url(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Build a notifier only when both credentials are present and non-blank.
    pub fn from_credentials(
        bot_token: Option<&str>,
        chat_id: Option<&str>,
        api_url: &str,
    ) -> Option<Self> {
        let bot_token = bot_token.map(str::trim).filter(|t| !t.is_empty())?;
        let chat_id = chat_id.map(str::trim).filter(|c| !c.is_empty())?;
        Some(Self::with_api_url(bot_token, chat_id, api_url))
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    fn destination(&self) -> &str {
        &self.chat_id
    }

    async fn send(&self, destination: &str, text: &str) -> Result<(), NotificationError> {
        let body = SendMessageRequest {
            chat_id: destination,
            text,
        };

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected(format!("{status}: {detail}")));
        }

        let parsed: SendMessageResponse = response.json().await?;
        if !parsed.ok {
            return Err(NotificationError::Rejected(
                parsed
                    .description
                    .unwrap_or_else(|| "ok=false without description".to_string()),
            ));
        }

        info!(chat_id = %destination, "Telegram message sent");
        Ok(())
    }
}

//! A client for sending messages through the Telegram Bot API.

use crate::core::{DeliveryReceipt, DeliveryTarget, DispatchError, Transport};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

/// Production endpoint of the Telegram Bot API.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Response envelope returned by every Bot API method call.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

/// Dispatches composed messages to Telegram's `sendMessage` endpoint.
///
/// Each dispatch builds its own HTTP client from the supplied target, performs
/// exactly one call, and interprets the provider's `ok` flag. No retries, no
/// delivery confirmation beyond the synchronous response.
pub struct TelegramClient {
    api_base: String,
}

impl Default for TelegramClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TelegramClient {
    /// Creates a client pointed at the production Bot API.
    pub fn new() -> Self {
        Self::with_api_base(TELEGRAM_API_BASE)
    }

    /// Creates a client pointed at an alternate endpoint, used by tests to
    /// target a mock server.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl Transport for TelegramClient {
    /// Sends `text` as an HTML-formatted message to the target chat.
    #[instrument(skip(self, target, text), fields(chat_id = target.chat_id))]
    async fn dispatch(
        &self,
        target: &DeliveryTarget,
        text: &str,
    ) -> Result<DeliveryReceipt, DispatchError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, target.bot_token);
        let payload = json!({
            "chat_id": target.chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let client = reqwest::Client::builder().build().map_err(|e| {
            let err = DispatchError::TransportFailure {
                detail: e.to_string(),
            };
            error!(error = %err, "Failed to construct HTTP client");
            err
        })?;

        let response = match client.post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                // Strip the URL from the error: it embeds the bot token.
                let err = DispatchError::TransportFailure {
                    detail: e.without_url().to_string(),
                };
                error!(error = %err, "HTTP request to Telegram failed");
                return Err(err);
            }
        };

        // The Bot API reports rejections through the `ok` flag in the body,
        // not the HTTP status line, so decode the envelope unconditionally.
        let body: ApiResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                let err = DispatchError::TransportFailure {
                    detail: e.without_url().to_string(),
                };
                error!(error = %err, "Failed to decode Telegram API response");
                return Err(err);
            }
        };

        if body.ok {
            info!(
                description = body.description.as_deref().unwrap_or(""),
                "Telegram message delivered"
            );
            Ok(DeliveryReceipt {
                description: body.description,
            })
        } else {
            let err = DispatchError::ProviderRejected {
                code: body.error_code.unwrap_or_default(),
                description: body.description.unwrap_or_default(),
            };
            error!(error = %err, "Telegram API rejected the message");
            Err(err)
        }
    }
}

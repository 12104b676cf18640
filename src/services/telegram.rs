use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{AppError, Result};

/// Bot API response envelope; `ok == false` is a hard failure for the cycle.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    ok: bool,
    result: Option<MessageResult>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    error_code: i64,
}

#[derive(Debug, Deserialize)]
struct MessageResult {
    message_id: i64,
}

/// Minimal Telegram Bot API client: send a channel message, edit one in
/// place. The API base is injected so tests can point it at a local stub.
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(bot_token: String, chat_id: String, proxy_url: Option<&str>) -> Result<Self> {
        Self::with_api_base(
            crate::constants::DEFAULT_TELEGRAM_API_BASE.to_string(),
            bot_token,
            chat_id,
            proxy_url,
        )
    }

    pub fn with_api_base(
        api_base: String,
        bot_token: String,
        chat_id: String,
        proxy_url: Option<&str>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(HTTP_TIMEOUT_SECS));

        if let Some(proxy_url) = proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| AppError::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    async fn call(&self, method: &str, payload: serde_json::Value) -> Result<ApiResponse> {
        debug!(method = method, "Calling Telegram API");

        let response = self
            .client
            .post(self.endpoint(method))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Telegram request failed: {}", e)))?;

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse Telegram response: {}", e)))?;

        if !parsed.ok {
            return Err(AppError::Api(format!(
                "code:{}, description:{}",
                parsed.error_code, parsed.description
            )));
        }

        Ok(parsed)
    }

    /// Send a new channel message, returning its message id.
    pub async fn send_message(&self, text: &str) -> Result<i64> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self.call("sendMessage", payload).await?;
        response
            .result
            .map(|r| r.message_id)
            .ok_or_else(|| AppError::Api("sendMessage response carried no message_id".to_string()))
    }

    /// Replace the text of an existing channel message.
    pub async fn edit_message(&self, message_id: i64, text: &str) -> Result<()> {
        let payload = json!({
            "chat_id": self.chat_id,
            "message_id": message_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        self.call("editMessageText", payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_layout() {
        let client = TelegramClient::with_api_base(
            "https://api.telegram.org/".to_string(),
            "123:abc".to_string(),
            "@channel".to_string(),
            None,
        )
        .unwrap();
        assert_eq!(
            client.endpoint("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_ok_response_decodes() {
        let body = r#"{"ok": true, "result": {"message_id": 42}}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.ok);
        assert_eq!(parsed.result.unwrap().message_id, 42);
    }

    #[test]
    fn test_error_response_decodes() {
        let body = r#"{"ok": false, "description": "Bad Request: message is not modified", "error_code": 400}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.ok);
        assert_eq!(parsed.error_code, 400);
        assert!(parsed.result.is_none());
    }
}

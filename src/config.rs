use std::path::PathBuf;

use crate::constants::{
    DEFAULT_PRICE_API_URL, DEFAULT_STATE_FILE, NEW_MESSAGE_PERIOD_SECS, UPDATE_PRICE_PERIOD_SECS,
};
use crate::error::{AppError, Result};

/// Pricing endpoint, overridable for tests and mirrors
pub fn price_api_url() -> String {
    std::env::var("PRICE_API_URL").unwrap_or_else(|_| DEFAULT_PRICE_API_URL.to_string())
}

/// Optional outbound proxy for both the feed and the Telegram API
pub fn proxy_url() -> Option<String> {
    std::env::var("PROXY_URL").ok().filter(|v| !v.trim().is_empty())
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Runtime configuration of the publishing bot, read from the environment
/// (a `.env` file is loaded at startup when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: String,
    /// Channel display name appended under every message
    pub channel_name: String,
    pub price_api_url: String,
    pub proxy_url: Option<String>,
    pub state_path: PathBuf,
    /// Seconds a price snapshot may age before it is re-fetched
    pub refresh_secs: i64,
    /// Seconds a channel message may be edited in place before a new one is
    /// sent
    pub rotate_after_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("BOT_TOKEN")
            .map_err(|_| AppError::Config("BOT_TOKEN is not set".to_string()))?;
        let chat_id = std::env::var("CHAT_ID")
            .map_err(|_| AppError::Config("CHAT_ID is not set".to_string()))?;

        let channel_name =
            std::env::var("CHANNEL_NAME").unwrap_or_else(|_| "@tomanbot".to_string());
        let state_path = std::env::var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE));

        Ok(Self {
            bot_token,
            chat_id,
            channel_name,
            price_api_url: price_api_url(),
            proxy_url: proxy_url(),
            state_path,
            refresh_secs: env_i64("REFRESH_INTERVAL_SECS", UPDATE_PRICE_PERIOD_SECS),
            rotate_after_secs: env_i64("NEW_MESSAGE_PERIOD_SECS", NEW_MESSAGE_PERIOD_SECS),
        })
    }
}

//! Cadence and display constants
//!
//! The three periods interact as follows: the worker wakes every
//! `UPDATE_MESSAGE_PERIOD_SECS`, re-fetches prices once they are
//! `UPDATE_PRICE_PERIOD_SECS` old, and abandons editing the channel message
//! in favor of a fresh one once it is `NEW_MESSAGE_PERIOD_SECS` old.

/// How often the worker loop wakes and pushes a message update (seconds)
pub const UPDATE_MESSAGE_PERIOD_SECS: u64 = 5;

/// How old the price snapshot may get before it is re-fetched (seconds)
pub const UPDATE_PRICE_PERIOD_SECS: i64 = 60;

/// Maximum age of a channel message before a new one is sent instead of
/// editing the old one in place (seconds)
pub const NEW_MESSAGE_PERIOD_SECS: i64 = 60 * 60;

/// Fixed wait after a failed fetch or publish before the next attempt (seconds)
pub const ERROR_BACKOFF_SECS: u64 = 60;

/// Timeout applied to every outbound HTTP call (seconds)
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// A quote whose source-reported update time is older than this carries the
/// staleness marker (seconds)
pub const STALE_QUOTE_SECS: i64 = 60 * 60;

/// Countdown values below this render the "updating now" footer instead of
/// the seconds-until-refresh line
pub const REFRESH_FOOTER_MIN_SECS: i64 = 7;

/// Default pricing endpoint (tgju market feed)
pub const DEFAULT_PRICE_API_URL: &str = "https://call3.tgju.org/ajax.json";

/// Default Telegram Bot API base
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default path of the persisted publish record
pub const DEFAULT_STATE_FILE: &str = "telegram_state.json";

/// Change-tag glyphs
pub const UP_GLYPH: &str = "🟢";
pub const DOWN_GLYPH: &str = "🔴";
pub const FLAT_GLYPH: &str = "⬅️";
pub const STALE_MARKER: &str = "⏳";

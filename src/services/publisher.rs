use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::services::telegram::TelegramClient;

/// The only durable state of the bot: which channel message was published
/// last, and when it was originally sent.
///
/// A missing, empty or corrupt state file loads as the zero record, which
/// the decision logic treats as "no prior message".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRecord {
    #[serde(default)]
    pub last_message_id: i64,
    #[serde(default)]
    pub last_message_time: i64,
}

/// What the next publish cycle should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// No usable prior message, or the prior one aged past the rotation
    /// threshold: send a fresh message
    SendNew,
    /// Prior message is still fresh: edit it in place
    Edit(i64),
}

impl PublishRecord {
    /// Load the record from disk, falling back to the zero record on any
    /// problem.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<PublishRecord>(&content) {
                Ok(record) => {
                    debug!("Loaded publish record from {}", path.display());
                    record
                }
                Err(e) => {
                    warn!(
                        "Failed to parse publish record from {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                debug!(
                    "No existing publish record at {}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Persist the record. Writes a temp file and renames it into place so a
    /// crash mid-write cannot leave a truncated record behind.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = serde_json::to_string(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        debug!("Saved publish record to {}", path.display());
        Ok(())
    }

    /// Decide the next action: edit while the last message is younger than
    /// `rotate_after_secs`, otherwise send a fresh one.
    pub fn decide(&self, now_unix: i64, rotate_after_secs: i64) -> PublishAction {
        if self.last_message_id > 0
            && self.last_message_time > 0
            && now_unix - self.last_message_time <= rotate_after_secs
        {
            PublishAction::Edit(self.last_message_id)
        } else {
            PublishAction::SendNew
        }
    }
}

/// Outcome of a successful publish cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Sent(i64),
    Edited(i64),
}

/// Edit-or-resend publisher.
///
/// Editing in place keeps the channel free of spam for fast-changing data;
/// the rotation threshold bounds how old a single message may get so late
/// subscribers still land on a recent one. `last_message_time` is never
/// refreshed on edits, which is what makes the rotation fire.
pub struct Publisher {
    telegram: TelegramClient,
    record: PublishRecord,
    state_path: PathBuf,
    rotate_after_secs: i64,
}

impl Publisher {
    pub fn new(telegram: TelegramClient, state_path: PathBuf, rotate_after_secs: i64) -> Self {
        let record = PublishRecord::load(&state_path);
        Self {
            telegram,
            record,
            state_path,
            rotate_after_secs,
        }
    }

    pub fn record(&self) -> &PublishRecord {
        &self.record
    }

    /// Publish `text`, editing the previous message while it is fresh enough
    /// and sending a new one otherwise. Any failure leaves the record
    /// exactly as it was, so the next cycle retries the same decision.
    pub async fn publish(&mut self, text: &str) -> Result<PublishOutcome> {
        let now_unix = Utc::now().timestamp();

        match self.record.decide(now_unix, self.rotate_after_secs) {
            PublishAction::Edit(message_id) => {
                self.telegram.edit_message(message_id, text).await?;
                Ok(PublishOutcome::Edited(message_id))
            }
            PublishAction::SendNew => {
                let message_id = self.telegram.send_message(text).await?;
                self.record = PublishRecord {
                    last_message_id: message_id,
                    last_message_time: now_unix,
                };
                self.record.save(&self.state_path)?;
                Ok(PublishOutcome::Sent(message_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_record_sends_new() {
        let record = PublishRecord::default();
        assert_eq!(record.decide(1_700_000_000, 3600), PublishAction::SendNew);
    }

    #[test]
    fn test_fresh_record_edits_same_id() {
        let record = PublishRecord {
            last_message_id: 42,
            last_message_time: 1_700_000_000,
        };
        assert_eq!(
            record.decide(1_700_000_000 + 100, 3600),
            PublishAction::Edit(42)
        );
    }

    #[test]
    fn test_age_at_threshold_still_edits() {
        let record = PublishRecord {
            last_message_id: 42,
            last_message_time: 1_700_000_000,
        };
        assert_eq!(
            record.decide(1_700_000_000 + 3600, 3600),
            PublishAction::Edit(42)
        );
    }

    #[test]
    fn test_stale_record_sends_new() {
        let record = PublishRecord {
            last_message_id: 42,
            last_message_time: 1_700_000_000,
        };
        assert_eq!(
            record.decide(1_700_000_000 + 3601, 3600),
            PublishAction::SendNew
        );
    }

    #[test]
    fn test_id_without_time_sends_new() {
        let record = PublishRecord {
            last_message_id: 42,
            last_message_time: 0,
        };
        assert_eq!(record.decide(1_700_000_000, 3600), PublishAction::SendNew);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let record = PublishRecord {
            last_message_id: 200,
            last_message_time: 1_700_000_123,
        };
        record.save(&path).unwrap();

        let loaded = PublishRecord::load(&path);
        assert_eq!(loaded, record);
        // No stray temp file left behind.
        assert!(!dir.path().join("state.tmp").exists());
    }

    #[test]
    fn test_load_nonexistent_is_zero_record() {
        let record = PublishRecord::load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(record, PublishRecord::default());
    }

    #[test]
    fn test_load_empty_file_is_zero_record() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, b"").unwrap();

        assert_eq!(PublishRecord::load(&path), PublishRecord::default());
    }

    #[test]
    fn test_load_malformed_file_is_zero_record() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, br#"{"last_message_id": "not_a_number"}"#).unwrap();

        assert_eq!(PublishRecord::load(&path), PublishRecord::default());
    }

    fn unreachable_telegram() -> TelegramClient {
        // Nothing listens on the discard port; every call fails fast.
        TelegramClient::with_api_base(
            "http://127.0.0.1:9".to_string(),
            "token".to_string(),
            "@channel".to_string(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_failed_send_leaves_record_intact() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut publisher = Publisher::new(unreachable_telegram(), path.clone(), 3600);
        let before = publisher.record().clone();

        assert!(publisher.publish("report").await.is_err());
        assert_eq!(*publisher.record(), before);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_record_intact() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let record = PublishRecord {
            last_message_id: 42,
            last_message_time: Utc::now().timestamp(),
        };
        record.save(&path).unwrap();

        let mut publisher = Publisher::new(unreachable_telegram(), path.clone(), 3600);
        assert!(publisher.publish("report").await.is_err());

        assert_eq!(*publisher.record(), record);
        assert_eq!(PublishRecord::load(&path), record);
    }

    #[test]
    fn test_state_file_wire_names() {
        let record = PublishRecord {
            last_message_id: 7,
            last_message_time: 9,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"last_message_id":7,"last_message_time":9}"#);
    }
}

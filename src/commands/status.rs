use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Result;
use crate::services::{PublishAction, PublishRecord};

/// Show the persisted publish record and what the next cycle would do.
pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    let record = PublishRecord::load(&config.state_path);

    println!("📊 Publish Status\n");
    println!("State file: {}", config.state_path.display());

    if record == PublishRecord::default() {
        println!("⚠️  No prior message recorded; next cycle sends a new one.");
        return Ok(());
    }

    let now_unix = Utc::now().timestamp();
    let age_secs = now_unix - record.last_message_time;

    println!("Last message id:   {}", record.last_message_id);
    if let Some(sent_at) = DateTime::from_timestamp(record.last_message_time, 0) {
        println!("Originally sent:   {}", sent_at);
    }
    println!("Message age:       {}s (rotation after {}s)", age_secs, config.rotate_after_secs);

    match record.decide(now_unix, config.rotate_after_secs) {
        PublishAction::Edit(message_id) => {
            println!("Next cycle:        edit message {}", message_id);
        }
        PublishAction::SendNew => {
            println!("Next cycle:        send a new message");
        }
    }

    Ok(())
}

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::constants::{ERROR_BACKOFF_SECS, REFRESH_FOOTER_MIN_SECS, UPDATE_MESSAGE_PERIOD_SECS};
use crate::error::Result;
use crate::services::{
    MarketApiClient, PriceFeed, PublishAction, PublishOutcome, PublishRecord, Publisher,
    TelegramClient,
};

/// What one tick of the loop should do, derived purely from the two ages and
/// their thresholds: the price refresh cadence and the message rotation
/// cadence evolve independently and only meet here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TickPlan {
    pub refresh: bool,
    pub action: PublishAction,
}

pub(crate) fn plan_tick(
    price_age_secs: Option<i64>,
    refresh_secs: i64,
    record: &PublishRecord,
    now_unix: i64,
    rotate_after_secs: i64,
) -> TickPlan {
    TickPlan {
        refresh: price_age_secs.map_or(true, |age| age >= refresh_secs),
        action: record.decide(now_unix, rotate_after_secs),
    }
}

/// Countdown shown in the footer, capped at the refresh period
pub(crate) fn seconds_until_refresh(price_age_secs: i64, refresh_secs: i64) -> i64 {
    (refresh_secs - price_age_secs).min(refresh_secs)
}

/// Append the refresh countdown and the channel signature to the report.
/// Close to the next refresh the countdown flips to an "updating" note.
pub(crate) fn compose_message(report: &str, next_refresh_secs: i64, channel_name: &str) -> String {
    if next_refresh_secs >= REFRESH_FOOTER_MIN_SECS {
        format!(
            "{}\nا⏰ {:02} ثانیه تا بروزرسانی بعدی\n\n{}\n",
            report, next_refresh_secs, channel_name
        )
    } else {
        format!("{}\n🔄 درحال بروزرسانی\n\n{}\n", report, channel_name)
    }
}

/// Poll/publish loop: wakes every few seconds, re-fetches prices once they
/// age past the refresh period, and pushes the formatted report to the
/// channel through the edit-or-resend publisher. Every failure is logged,
/// waited out with a fixed backoff, and retried on the next cycle; the loop
/// never exits on its own.
#[instrument(skip(config))]
pub async fn run(config: Config) -> Result<()> {
    let market = MarketApiClient::new(config.price_api_url.clone(), config.proxy_url.as_deref())?;
    let mut feed = PriceFeed::new(market);

    let telegram = TelegramClient::new(
        config.bot_token.clone(),
        config.chat_id.clone(),
        config.proxy_url.as_deref(),
    )?;
    let mut publisher = Publisher::new(telegram, config.state_path.clone(), config.rotate_after_secs);

    info!(
        refresh_secs = config.refresh_secs,
        rotate_after_secs = config.rotate_after_secs,
        state_file = %config.state_path.display(),
        "Starting publish worker"
    );

    let mut iteration_count = 0u64;

    loop {
        iteration_count += 1;
        let now = Utc::now();
        let now_unix = now.timestamp();

        let plan = plan_tick(
            feed.age_secs(now_unix),
            config.refresh_secs,
            publisher.record(),
            now_unix,
            config.rotate_after_secs,
        );
        debug!(
            iteration = iteration_count,
            refresh = plan.refresh,
            action = ?plan.action,
            "Publish worker: tick plan"
        );

        if plan.refresh {
            match feed.refresh().await {
                Ok(()) => {
                    info!(iteration = iteration_count, "Publish worker: prices refreshed");
                }
                Err(e) => {
                    error!(
                        iteration = iteration_count,
                        error = %e,
                        "Publish worker: price refresh failed"
                    );
                    sleep(Duration::from_secs(ERROR_BACKOFF_SECS)).await;
                    continue;
                }
            }
        }

        let Some(snapshot) = feed.snapshot() else {
            // Unreachable in practice: a missing snapshot forces a refresh
            // above, and a failed refresh already restarted the loop.
            sleep(Duration::from_secs(UPDATE_MESSAGE_PERIOD_SECS)).await;
            continue;
        };

        let price_age = feed.age_secs(now_unix).unwrap_or(0);
        let countdown = seconds_until_refresh(price_age, config.refresh_secs);
        let message = compose_message(
            &snapshot.render_report(now),
            countdown,
            &config.channel_name,
        );

        match publisher.publish(&message).await {
            Ok(PublishOutcome::Sent(message_id)) => {
                info!(
                    iteration = iteration_count,
                    message_id = message_id,
                    "Publish worker: sent new channel message"
                );
            }
            Ok(PublishOutcome::Edited(message_id)) => {
                info!(
                    iteration = iteration_count,
                    message_id = message_id,
                    "Publish worker: edited channel message"
                );
            }
            Err(e) => {
                error!(
                    iteration = iteration_count,
                    error = %e,
                    "Publish worker: publish failed"
                );
                sleep(Duration::from_secs(ERROR_BACKOFF_SECS)).await;
                continue;
            }
        }

        sleep(Duration::from_secs(UPDATE_MESSAGE_PERIOD_SECS)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_refreshes_before_first_fetch() {
        let record = PublishRecord::default();
        let plan = plan_tick(None, 60, &record, 1_700_000_000, 3600);
        assert!(plan.refresh);
        assert_eq!(plan.action, PublishAction::SendNew);
    }

    #[test]
    fn test_plan_skips_fresh_prices() {
        let record = PublishRecord {
            last_message_id: 9,
            last_message_time: 1_700_000_000 - 30,
        };
        let plan = plan_tick(Some(10), 60, &record, 1_700_000_000, 3600);
        assert!(!plan.refresh);
        assert_eq!(plan.action, PublishAction::Edit(9));
    }

    #[test]
    fn test_plan_refreshes_exactly_at_period() {
        let record = PublishRecord::default();
        let plan = plan_tick(Some(60), 60, &record, 1_700_000_000, 3600);
        assert!(plan.refresh);
    }

    #[test]
    fn test_plan_rotates_old_message_independently() {
        // Fresh prices, stale message: the two cadences are independent.
        let record = PublishRecord {
            last_message_id: 9,
            last_message_time: 1_700_000_000 - 4000,
        };
        let plan = plan_tick(Some(10), 60, &record, 1_700_000_000, 3600);
        assert!(!plan.refresh);
        assert_eq!(plan.action, PublishAction::SendNew);
    }

    #[test]
    fn test_countdown_caps_at_period() {
        assert_eq!(seconds_until_refresh(0, 60), 60);
        assert_eq!(seconds_until_refresh(45, 60), 15);
        assert_eq!(seconds_until_refresh(-5, 60), 60);
    }

    #[test]
    fn test_compose_with_countdown() {
        let message = compose_message("report", 55, "@channel");
        assert!(message.starts_with("report\n"));
        assert!(message.contains("ا⏰ 55 ثانیه تا بروزرسانی بعدی"));
        assert!(message.ends_with("@channel\n"));
    }

    #[test]
    fn test_compose_zero_pads_countdown() {
        let message = compose_message("report", 7, "@channel");
        assert!(message.contains("ا⏰ 07 ثانیه"));
    }

    #[test]
    fn test_compose_switches_to_updating_note() {
        let message = compose_message("report", 6, "@channel");
        assert!(message.contains("🔄 درحال بروزرسانی"));
        assert!(!message.contains("ثانیه تا بروزرسانی"));
    }
}

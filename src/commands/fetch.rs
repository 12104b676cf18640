use chrono::Utc;

use crate::config;
use crate::error::Result;
use crate::services::{MarketApiClient, PriceFeed};

/// One-shot refresh and print, for checking the feed and the report format
/// without touching Telegram.
pub async fn run() -> Result<()> {
    let client = MarketApiClient::new(config::price_api_url(), config::proxy_url().as_deref())?;
    let mut feed = PriceFeed::new(client);

    feed.refresh().await?;

    if let Some(snapshot) = feed.snapshot() {
        println!("{}", snapshot.render_report(Utc::now()));
    }

    Ok(())
}

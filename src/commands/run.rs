use crate::config::Config;
use crate::error::Result;
use crate::worker;

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;

    println!("🚀 Starting tomanbot for {}", config.channel_name);
    println!("📡 Price feed: {}", config.price_api_url);
    if config.proxy_url.is_some() {
        println!("🔀 Outbound proxy enabled");
    }

    worker::run_publish_worker(config).await
}

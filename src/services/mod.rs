pub mod market_api;
pub mod publisher;
pub mod telegram;

pub use market_api::{MarketApiClient, PriceFeed};
pub use publisher::{PublishAction, PublishOutcome, PublishRecord, Publisher};
pub use telegram::TelegramClient;

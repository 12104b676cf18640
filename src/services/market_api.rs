use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Asia::Tehran;
use serde::Deserialize;
use tracing::debug;

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::models::{MarketSnapshot, Quote};

/// Response envelope of the pricing endpoint
#[derive(Debug, Deserialize)]
struct CurrentPrices {
    #[serde(default)]
    current: HashMap<String, Quote>,
}

/// Client for the public market pricing endpoint.
///
/// The base URL and proxy are injected so tests and deployments behind a
/// filtered network can redirect the client without touching globals.
pub struct MarketApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl MarketApiClient {
    pub fn new(base_url: String, proxy_url: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(HTTP_TIMEOUT_SECS));

        if let Some(proxy_url) = proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("Invalid proxy URL '{}': {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Fetch the current instrument records, keyed by feed code.
    ///
    /// `now_unix` rides along as a `what` query parameter purely to defeat
    /// intermediate caches.
    pub async fn fetch_current(&self, now_unix: i64) -> Result<HashMap<String, Quote>> {
        let url = format!("{}?what={}", self.base_url, now_unix);
        debug!(url = %url, "Fetching market prices");

        let response = self
            .client
            .get(&url)
            .header("Accept-Language", "fa-IR")
            .send()
            .await
            .map_err(|e| Error::Network(format!("Price request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "Unexpected status code: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read price response: {}", e)))?;

        let parsed: CurrentPrices = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse price response: {}", e)))?;

        Ok(parsed.current)
    }
}

/// Owner of the most recent market snapshot.
///
/// A failed refresh leaves the previous snapshot in place; the caller keeps
/// publishing the last good data until the feed recovers.
pub struct PriceFeed {
    client: MarketApiClient,
    snapshot: Option<MarketSnapshot>,
}

impl PriceFeed {
    pub fn new(client: MarketApiClient) -> Self {
        Self {
            client,
            snapshot: None,
        }
    }

    /// Fetch and atomically replace the snapshot, stamping the fetch time in
    /// Tehran local time.
    pub async fn refresh(&mut self) -> Result<()> {
        let fetched_at = Utc::now().with_timezone(&Tehran);
        let raw = self.client.fetch_current(fetched_at.timestamp()).await?;
        self.snapshot = Some(MarketSnapshot::from_raw(raw, fetched_at));
        Ok(())
    }

    pub fn snapshot(&self) -> Option<&MarketSnapshot> {
        self.snapshot.as_ref()
    }

    /// Seconds since the last successful refresh; `None` before the first one
    pub fn age_secs(&self, now_unix: i64) -> Option<i64> {
        self.snapshot
            .as_ref()
            .map(|s| now_unix - s.fetched_at.timestamp())
    }
}

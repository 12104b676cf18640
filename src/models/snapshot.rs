use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::instrument::{Instrument, Unit, REPORT_GROUPS};
use crate::models::jalali::{gregorian_to_jalali, JalaliDate};
use crate::models::quote::Quote;
use crate::utils::to_toman;

/// The most recent parsed market data plus its fetch timestamp.
///
/// A snapshot is immutable once built and replaced wholesale on every
/// successful refresh; instruments the feed did not deliver render from a
/// default quote.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    quotes: HashMap<Instrument, Quote>,
    pub fetched_at: DateTime<Tz>,
    pub fetched_at_jalali: JalaliDate,
}

impl MarketSnapshot {
    /// Build a snapshot from the string-keyed feed records, keeping only the
    /// tracked instruments.
    pub fn from_raw(mut raw: HashMap<String, Quote>, fetched_at: DateTime<Tz>) -> Self {
        let mut quotes = HashMap::new();
        for group in REPORT_GROUPS {
            for instrument in *group {
                if let Some(quote) = raw.remove(instrument.code()) {
                    quotes.insert(*instrument, quote);
                }
            }
        }

        let fetched_at_jalali =
            gregorian_to_jalali(fetched_at.year(), fetched_at.month(), fetched_at.day());

        Self {
            quotes,
            fetched_at,
            fetched_at_jalali,
        }
    }

    /// Render the full multi-line Farsi report.
    ///
    /// Leading "ا" on each line keeps right-to-left rendering stable in
    /// Telegram clients.
    pub fn render_report(&self, now: DateTime<Utc>) -> String {
        let default_quote = Quote::default();
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!(
            "ا📆 اخرین بروزرسانی: {:02}:{:02}:{:02} {}",
            self.fetched_at.hour(),
            self.fetched_at.minute(),
            self.fetched_at.second(),
            self.fetched_at_jalali
        ));

        for group in REPORT_GROUPS {
            lines.push(String::new());
            for instrument in *group {
                let quote = self.quotes.get(instrument).unwrap_or(&default_quote);
                let value = match instrument.unit() {
                    Unit::Toman => to_toman(&quote.price),
                    Unit::Rial | Unit::Dollar => quote.price.clone(),
                };
                lines.push(format!(
                    "ا{} ({}) {} *{}* {}",
                    instrument.label(),
                    quote.time,
                    quote.change_tag(now),
                    value,
                    instrument.unit().suffix()
                ));
            }
        }

        lines.join("\n")
    }
}

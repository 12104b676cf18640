mod instrument;
mod jalali;
mod quote;
mod snapshot;

pub use instrument::{Instrument, Unit, REPORT_GROUPS};
pub use jalali::{gregorian_to_jalali, JalaliDate};
pub use quote::{ChangeDirection, Quote};
pub use snapshot::MarketSnapshot;

use std::fmt;

/// Cumulative days before each Gregorian month, non-leap year
const GREGORIAN_MONTH_OFFSETS: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A solar-Hijri (Jalali) calendar date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Convert a Gregorian civil date to a Jalali date.
///
/// This is the classic day-count approximation: elapsed days since the epoch
/// are computed from a non-leap month offset table plus the Gregorian leap
/// rules, then reduced through the 33-year (12053-day) and 4-year (1461-day)
/// Jalali cycles. It drifts from the exact astronomical calendar at century
/// boundaries, which is accepted; the displayed dates must stay identical to
/// what this exact computation yields.
pub fn gregorian_to_jalali(year: i32, month: u32, day: u32) -> JalaliDate {
    let (year, mut jalali_year) = if year <= 1600 {
        (year - 621, 0)
    } else {
        (year - 1600, 979)
    };

    let temp = if year > 2 { year + 1 } else { year };

    let mut days = (temp + 3) / 4 + 365 * year - (temp + 99) / 100 - 80
        + GREGORIAN_MONTH_OFFSETS[(month - 1) as usize]
        + (temp + 399) / 400
        + day as i32;

    jalali_year += 33 * (days / 12053);
    days %= 12053;

    jalali_year += 4 * (days / 1461);
    days %= 1461;

    if days > 365 {
        jalali_year += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (month, day) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };

    JalaliDate {
        year: jalali_year,
        month: month as u32,
        day: day as u32,
    }
}

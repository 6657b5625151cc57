use chrono::{Datelike, Month, NaiveDate};

/// Used when a label doesn't name a month.
pub const FALLBACK_DAYS: u32 = 30;

/// Full English name of the month `date` falls into. This is the default tracker label.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Date as it's shown in the footer, e.g. "October 16, 2026".
pub fn footer_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Matches full English month names, ignoring case. Abbreviations like "Jan" are not months.
pub fn month_from_label(label: &str) -> Option<Month> {
    (0..12u8)
        .filter_map(|i| Month::try_from(i + 1).ok())
        .find(|month| month.name().eq_ignore_ascii_case(label))
}

pub fn days_in_month(year: i32, month: Month) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    let next = match month {
        Month::December => NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
        _ => NaiveDate::from_ymd_opt(year, month.succ().number_from_month(), 1)?,
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Suggested day count for a tracker: length of the named month in the current year, or
/// [FALLBACK_DAYS] for anything else.
pub fn default_days_for(label: &str, today: NaiveDate) -> u32 {
    month_from_label(label)
        .and_then(|month| days_in_month(today.year(), month))
        .unwrap_or(FALLBACK_DAYS)
}

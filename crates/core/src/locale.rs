//! Date formatting in the ko-KR style used across the admin pages.
//!
//! Timestamps come from the backend in UTC and are shown in Korea Standard
//! Time (UTC+9, no daylight saving).

use chrono::{DateTime, FixedOffset, Timelike, Utc};

const KST_OFFSET_SECONDS: i32 = 9 * 3600;

fn to_kst(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(KST_OFFSET_SECONDS)
        .map_or_else(|| at.fixed_offset(), |kst| at.with_timezone(&kst))
}

/// `2025. 3. 1.`
#[must_use]
pub fn format_date(at: DateTime<Utc>) -> String {
    to_kst(at).format("%Y. %-m. %-d.").to_string()
}

/// `2025. 3. 1. 오후 6:05:09`
#[must_use]
pub fn format_date_time(at: DateTime<Utc>) -> String {
    let local = to_kst(at);
    let meridiem = if local.hour() < 12 { "오전" } else { "오후" };
    format!(
        "{} {meridiem} {}",
        local.format("%Y. %-m. %-d."),
        local.format("%-I:%M:%S")
    )
}

use chrono::{DateTime, Local, Utc};

// Instant that works on both native and WASM targets.
pub use web_time::Instant as AppInstant;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_MIN * 15;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_H * 4;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;

    pub fn now_timestamp_ms() -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Order/fill rows show local wall-clock dates, e.g. "Feb 03 14:05".
pub fn epoch_ms_to_date_string(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.with_timezone(&Local).format("%b %d %H:%M").to_string(),
        None => "--".to_string(),
    }
}

fn epoch_ms_to_clock_string(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.with_timezone(&Local).format("%H:%M").to_string(),
        None => "--".to_string(),
    }
}

/// Compact age for the trades ticker: "5s", "3m", "2h", then a clock time.
pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff_secs = (now_ms - timestamp_ms).max(0) / TimeUtils::MS_IN_S;

    if diff_secs < 60 {
        format!("{}s", diff_secs)
    } else if diff_secs < 60 * 60 {
        format!("{}m", diff_secs / 60)
    } else if diff_secs < 24 * 60 * 60 {
        format!("{}h", diff_secs / 3600)
    } else {
        epoch_ms_to_clock_string(timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_time_buckets() {
        let now = 1_700_000_000_000;
        assert_eq!(format_relative_time(now - 5_000, now), "5s");
        assert_eq!(format_relative_time(now - 90_000, now), "1m");
        assert_eq!(format_relative_time(now - 3 * TimeUtils::MS_IN_H, now), "3h");
    }

    #[test]
    fn relative_time_never_negative() {
        let now = 1_700_000_000_000;
        // Timestamp slightly in the future (tick jitter) must not underflow.
        assert_eq!(format_relative_time(now + 500, now), "0s");
    }
}

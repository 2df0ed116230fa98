use chrono::{DateTime, Local, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_MIN * 15;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_H * 4;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
    pub const SHORT_TIME_FORMAT: &str = "%m-%d %H:%M";
}

/// Formats epoch milliseconds as UTC using `STANDARD_TIME_FORMAT`.
/// Out-of-range timestamps format as an empty string.
pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TimeUtils::STANDARD_TIME_FORMAT)
}

// Used for plot axis labels where space is tight
pub fn epoch_ms_to_short_utc(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TimeUtils::SHORT_TIME_FORMAT)
}

fn format_epoch_ms(epoch_ms: i64, fmt: &str) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format(fmt).to_string(),
        None => String::new(),
    }
}

pub fn local_now_as_timestamp_ms() -> i64 {
    Local::now().timestamp_millis()
}

/// Floors `timestamp_ms` to the start of the interval bucket it falls in.
pub fn floor_to_interval(timestamp_ms: i64, interval_ms: i64) -> i64 {
    if interval_ms <= 0 {
        return timestamp_ms;
    }
    timestamp_ms - timestamp_ms.rem_euclid(interval_ms)
}

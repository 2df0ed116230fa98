use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::utils::TimeUtils;
use crate::utils::time_utils::floor_to_interval;

/// Chart timeframes offered to the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Interval {
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    OneMinute,
    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    FiveMinutes,
    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[default]
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,
    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    FourHours,
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,
    #[strum(serialize = "1w")]
    #[serde(rename = "1w")]
    OneWeek,
}

impl Interval {
    pub fn to_ms(self) -> i64 {
        match self {
            Interval::OneMinute => TimeUtils::MS_IN_MIN,
            Interval::FiveMinutes => TimeUtils::MS_IN_5_MIN,
            Interval::FifteenMinutes => TimeUtils::MS_IN_15_MIN,
            Interval::OneHour => TimeUtils::MS_IN_H,
            Interval::FourHours => TimeUtils::MS_IN_4_H,
            Interval::OneDay => TimeUtils::MS_IN_D,
            Interval::OneWeek => TimeUtils::MS_IN_W,
        }
    }

    /// Shift of the exchange's bar grid from the Unix epoch. Weekly bars open on
    /// Monday 00:00 UTC and the epoch fell on a Thursday.
    pub fn grid_offset_ms(self) -> i64 {
        match self {
            Interval::OneWeek => 4 * TimeUtils::MS_IN_D,
            _ => 0,
        }
    }

    /// Open time of the bar that contains `timestamp_ms`.
    pub fn open_time_containing(self, timestamp_ms: i64) -> i64 {
        let offset = self.grid_offset_ms();
        floor_to_interval(timestamp_ms - offset, self.to_ms()) + offset
    }
}

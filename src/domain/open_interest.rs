use serde::{Deserialize, Serialize};

/// A single open-interest reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenInterestPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

impl OpenInterestPoint {
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

//! Report defaults: what one fetch pulls and how much of it is shown.

pub struct SyntheticOpenInterestConfig {
    /// Inclusive lower bound of generated values
    pub min_value: u32,
    /// Exclusive upper bound of generated values
    pub max_value: u32,
}

pub struct ReportConfig {
    pub default_pair: &'static str,
    /// Candles requested per run (most recent N)
    pub candle_limit: usize,
    /// Order-book levels highlighted per side
    pub top_levels: usize,
    /// Points requested from the open-interest source
    pub open_interest_periods: usize,
    pub synthetic_open_interest: SyntheticOpenInterestConfig,
}

pub const REPORT: ReportConfig = ReportConfig {
    default_pair: "BTC/USDT",
    candle_limit: 100,
    top_levels: 3,
    open_interest_periods: 100,
    synthetic_open_interest: SyntheticOpenInterestConfig {
        min_value: 1000,
        max_value: 5000,
    },
};

use std::fmt;

/// Failures surfaced by the market data and open interest sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// Candles could not be fetched, or the pair/interval was rejected.
    DataUnavailable(String),
    /// The order book could not be fetched. Recoverable.
    OrderBookUnavailable(String),
    /// The open interest feed produced nothing usable. Recoverable.
    OpenInterestUnavailable(String),
}

impl fmt::Display for MarketDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataError::DataUnavailable(msg) => write!(f, "Candle data unavailable: {}", msg),
            MarketDataError::OrderBookUnavailable(msg) => {
                write!(f, "Order book unavailable: {}", msg)
            }
            MarketDataError::OpenInterestUnavailable(msg) => {
                write!(f, "Open interest unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for MarketDataError {}

use async_trait::async_trait;

use crate::data::error::MarketDataError;
use crate::domain::{Candle, Interval, OrderBookSnapshot, TradingPair};

/// Exchange access used by the report pipeline.
///
/// Implementations are built once and shared across runs, so they should hold
/// any connection state themselves rather than rebuild it per call.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// The most recent `limit` candles, oldest first.
    async fn fetch_candles(
        &self,
        pair: &TradingPair,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;

    /// Current order book. Failures map to `OrderBookUnavailable`.
    async fn fetch_order_book(
        &self,
        pair: &TradingPair,
    ) -> Result<OrderBookSnapshot, MarketDataError>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

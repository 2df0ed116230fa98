// Exchange access and open interest feeds
pub mod binance;
pub mod error;
pub mod market_data;
pub mod open_interest;

// Re-export commonly used types
pub use binance::BinanceMarketData;
pub use error::MarketDataError;
pub use market_data::MarketDataClient;
pub use open_interest::{OpenInterestSource, SyntheticOpenInterest};

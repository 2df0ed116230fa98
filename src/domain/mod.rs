// Domain types and value objects
pub mod candle;
pub mod interval;
pub mod open_interest;
pub mod order_book;
pub mod pair;

// Re-export commonly used types
pub use candle::Candle;
pub use interval::Interval;
pub use open_interest::OpenInterestPoint;
pub use order_book::{AskRanking, BookSide, OrderBookLevel, OrderBookSnapshot};
pub use pair::TradingPair;

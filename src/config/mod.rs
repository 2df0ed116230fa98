//! Configuration module for the scanner application.

pub mod binance;

mod debug; // Private: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;
pub mod report;

// Re-export commonly used items
pub use binance::BINANCE;
pub use report::REPORT;

pub mod alignment;
pub mod direction;

pub use alignment::{Alignment, check_alignment};
pub use direction::{DirectionVerdict, MarketPattern, Regime, classify};

use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLCV bar. `open_time_ms` is the exchange's bar open time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time_ms: i64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        open_time_ms: i64,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Candle {
            open_time_ms,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }

    pub fn get_type(&self) -> CandleType {
        if self.close_price >= self.open_price {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open_price, self.close_price),
            CandleType::Bearish => (self.close_price, self.open_price),
        }
    }
}

/// True when every candle opens strictly after the one before it.
pub fn is_strictly_increasing(candles: &[Candle]) -> bool {
    candles
        .windows(2)
        .all(|pair| pair[0].open_time_ms < pair[1].open_time_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_range_orders_open_and_close() {
        let up = Candle::new(0, 100.0, 110.0, 95.0, 105.0, 1.0);
        let down = Candle::new(1, 105.0, 106.0, 90.0, 100.0, 1.0);
        assert_eq!(up.get_type(), CandleType::Bullish);
        assert_eq!(up.body_range(), (100.0, 105.0));
        assert_eq!(down.get_type(), CandleType::Bearish);
        assert_eq!(down.body_range(), (100.0, 105.0));
    }

    #[test]
    fn detects_out_of_order_timestamps() {
        let a = Candle::new(10, 1.0, 1.0, 1.0, 1.0, 1.0);
        let b = Candle::new(20, 1.0, 1.0, 1.0, 1.0, 1.0);
        assert!(is_strictly_increasing(&[a, b]));
        assert!(!is_strictly_increasing(&[b, a]));
        assert!(!is_strictly_increasing(&[a, a]));
        assert!(is_strictly_increasing(&[]));
    }
}

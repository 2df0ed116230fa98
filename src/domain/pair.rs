use serde::{Deserialize, Serialize};
use std::fmt;

static PAIR_QUOTES: &[&str] = &["USDT", "USDC", "FDUSD", "BTC", "ETH"];
static PAIR_SEPARATORS: &[char] = &['/', '-', '_'];

/// A trading pair as typed by the user, e.g. `BTC/USDT`.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct TradingPair {
    pub base: String,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairParseError {
    Empty,
    Malformed(String),
}

impl fmt::Display for PairParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairParseError::Empty => write!(f, "Trading pair is empty"),
            PairParseError::Malformed(text) => {
                write!(f, "Cannot read '{}' as a trading pair (e.g. BTC/USDT)", text)
            }
        }
    }
}

impl std::error::Error for PairParseError {}

impl TradingPair {
    /// Parses `BTC/USDT`, `btc-usdt`, `ETH_BTC` or a bare `BTCUSDT`.
    pub fn parse(text: &str) -> Result<Self, PairParseError> {
        let cleaned: String = text.trim().to_uppercase();
        if cleaned.is_empty() {
            return Err(PairParseError::Empty);
        }

        let malformed = || PairParseError::Malformed(text.trim().to_string());

        if let Some((base, quote)) = cleaned.split_once(PAIR_SEPARATORS) {
            let (base, quote) = (base.trim(), quote.trim());
            if base.is_empty() || quote.is_empty() || !is_asset_code(base) || !is_asset_code(quote)
            {
                return Err(malformed());
            }
            return Ok(Self {
                base: base.to_string(),
                quote: quote.to_string(),
            });
        }

        if !is_asset_code(&cleaned) {
            return Err(malformed());
        }
        let quote = Self::get_quote(&cleaned).ok_or_else(malformed)?;
        let base = cleaned.strip_suffix(quote).unwrap_or_default();
        if base.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            base: base.to_string(),
            quote: quote.to_string(),
        })
    }

    // Finds the trading quote at the end of the pair name and returns it.
    // Returns None if no matching quote is found.
    pub fn get_quote(text: &str) -> Option<&'static str> {
        PAIR_QUOTES
            .iter()
            .find(|&&ext| text.ends_with(ext))
            .copied()
    }

    // The name we pass into the Binance API (not necessarily display name)
    pub fn bn_name(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

fn is_asset_code(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_separated_pair() {
        let pair = TradingPair::parse("BTC/USDT").unwrap();
        assert_eq!(pair.base, "BTC");
        assert_eq!(pair.quote, "USDT");
        assert_eq!(pair.bn_name(), "BTCUSDT");
        assert_eq!(pair.to_string(), "BTC/USDT");
    }

    #[test]
    fn normalises_case_whitespace_and_separators() {
        assert_eq!(
            TradingPair::parse("  eth-btc ").unwrap().bn_name(),
            "ETHBTC"
        );
        assert_eq!(TradingPair::parse("sol_usdc").unwrap().bn_name(), "SOLUSDC");
    }

    #[test]
    fn splits_bare_symbol_on_known_quote() {
        let pair = TradingPair::parse("SOLUSDT").unwrap();
        assert_eq!(pair.base, "SOL");
        assert_eq!(pair.quote, "USDT");
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert_eq!(TradingPair::parse("   "), Err(PairParseError::Empty));
        assert!(TradingPair::parse("BTC/").is_err());
        assert!(TradingPair::parse("/USDT").is_err());
        assert!(TradingPair::parse("USDT").is_err());
        assert!(TradingPair::parse("FOOBAR").is_err());
        assert!(TradingPair::parse("BTC/US DT").is_err());
    }
}

// Std library crates
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

// External crates
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use binance_sdk::config::ConfigurationRestApi;
use binance_sdk::errors::{self, ConnectorError as connection_error};
use binance_sdk::spot::{
    SpotRestApi,
    rest_api::{DepthParams, KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
};

// Local crates
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::binance::{BINANCE, BinanceApiConfig};
use crate::data::error::MarketDataError;
use crate::data::market_data::MarketDataClient;
use crate::domain::{Candle, Interval, OrderBookLevel, OrderBookSnapshot, TradingPair};

impl From<Interval> for KlinesIntervalEnum {
    fn from(interval: Interval) -> Self {
        match interval {
            Interval::OneMinute => KlinesIntervalEnum::Interval1m,
            Interval::FiveMinutes => KlinesIntervalEnum::Interval5m,
            Interval::FifteenMinutes => KlinesIntervalEnum::Interval15m,
            Interval::OneHour => KlinesIntervalEnum::Interval1h,
            Interval::FourHours => KlinesIntervalEnum::Interval4h,
            Interval::OneDay => KlinesIntervalEnum::Interval1d,
            Interval::OneWeek => KlinesIntervalEnum::Interval1w,
        }
    }
}

// Custom error type for kline rows for better error messages.
#[derive(Debug)]
pub enum BNKlineError {
    InvalidLength,
    InvalidType(String),
    MissingField(&'static str),
}

impl fmt::Display for BNKlineError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BNKlineError::InvalidLength => write!(f, "Invalid length"),
            BNKlineError::InvalidType(string) => write!(f, "Invalid type: {}", string),
            BNKlineError::MissingField(field) => write!(f, "Missing or unparsable {}", field),
        }
    }
}

impl Error for BNKlineError {}

/*
Returns Some(f64) only if the input was the String variant and that string parses.
Binance sends every price/volume column as a decimal string.
*/
fn kline_item_to_float(item: Option<KlinesItemInner>) -> Option<f64> {
    item.and_then(|inner| {
        if let KlinesItemInner::String(s) = inner {
            s.parse::<f64>().ok()
        } else {
            None
        }
    })
}

/// Newtype so the conversion lives next to the wire format rather than the domain type.
struct BNKline(Candle);

impl TryFrom<Vec<KlinesItemInner>> for BNKline {
    type Error = BNKlineError;

    fn try_from(vec_inner_klines: Vec<KlinesItemInner>) -> Result<Self, Self::Error> {
        let mut items = vec_inner_klines.into_iter();
        let open_time_ms = match items.next().ok_or(BNKlineError::InvalidLength)? {
            KlinesItemInner::Integer(a) => a,
            _ => return Err(BNKlineError::InvalidType("open_time".to_string())),
        };

        let mut next_float = |field: &'static str| {
            kline_item_to_float(items.next()).ok_or(BNKlineError::MissingField(field))
        };
        let open_price = next_float("open")?;
        let high_price = next_float("high")?;
        let low_price = next_float("low")?;
        let close_price = next_float("close")?;
        let volume = next_float("volume")?;

        Ok(BNKline(Candle::new(
            open_time_ms,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        )))
    }
}

fn convert_klines(data: Vec<Vec<KlinesItemInner>>) -> Result<Vec<Candle>, BNKlineError> {
    data.into_iter()
        .map(|row| BNKline::try_from(row).map(|k| k.0))
        .collect()
}

/// Depth rows arrive as `[price, size]` string pairs.
fn convert_levels(rows: Vec<Vec<String>>) -> Result<Vec<OrderBookLevel>> {
    rows.into_iter()
        .map(|row| -> Result<OrderBookLevel> {
            match row.as_slice() {
                [price, size, ..] => Ok(OrderBookLevel::new(
                    price.parse().with_context(|| format!("bad price '{}'", price))?,
                    size.parse().with_context(|| format!("bad size '{}'", size))?,
                )),
                _ => bail!("depth row has {} columns, expected 2", row.len()),
            }
        })
        .collect()
}

fn configure_binance_client() -> Result<RestApi> {
    let config = BinanceApiConfig::default();
    let rest_conf = ConfigurationRestApi::builder()
        .timeout(config.timeout_ms)
        .retries(config.retries)
        .backoff(config.backoff_ms)
        .build()?;
    // Create the Spot REST API client
    let rest_client = SpotRestApi::production(rest_conf);
    Ok(rest_client)
}

fn log_connector_error(context: &str, e: &anyhow::Error) {
    if let Some(conn_err) = e.downcast_ref::<errors::ConnectorError>() {
        match conn_err {
            connection_error::ConnectorClientError(msg) => {
                log::error!("{} Client error: Check your request parameters. {}", context, msg);
            }
            connection_error::TooManyRequestsError(msg) => {
                log::error!("{} Rate limit exceeded. Please wait and try again. {}", context, msg);
            }
            connection_error::RateLimitBanError(msg) => {
                log::error!("{} IP address banned due to excessive rate limits. {}", context, msg);
            }
            errors::ConnectorError::ServerError { msg, status_code } => {
                log::error!("{} Server error: {} (status code: {:?})", context, msg, status_code);
            }
            errors::ConnectorError::NetworkError(msg) => {
                log::error!("{} Network error: Check your internet connection. {}", context, msg);
            }
            connection_error::BadRequestError(msg) => {
                log::error!("{} Bad request: Verify the pair symbol. {}", context, msg);
            }
            other => {
                log::error!("{} Unexpected ConnectionError variant: {:?}", context, other);
            }
        }
    } else {
        log::error!("An unexpected error occurred for {}: {:#}", context, e);
    }
}

/// Binance spot REST access. Built once; the inner client is reused for every run.
pub struct BinanceMarketData {
    rest_client: RestApi,
}

impl BinanceMarketData {
    pub fn new() -> Result<Self> {
        let rest_client = configure_binance_client().context("building Binance REST client")?;
        Ok(Self { rest_client })
    }

    async fn load_klines(
        &self,
        pair: &TradingPair,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let limit = limit.clamp(1, BINANCE.limits.klines_max) as i32;
        let params = KlinesParams::builder(pair.bn_name(), interval.into())
            .limit(limit)
            .build()?;

        let response = self.rest_client.klines(params).await?;
        let data = response.data().await?;

        let candles = convert_klines(data)
            .map_err(|e| anyhow::Error::new(e).context(format!("{} convert_klines failed", pair)))?;
        if candles.is_empty() {
            bail!("{} {}: exchange returned zero klines", pair, interval);
        }
        Ok(candles)
    }

    async fn load_depth(&self, pair: &TradingPair) -> Result<OrderBookSnapshot> {
        let params = DepthParams::builder(pair.bn_name())
            .limit(BINANCE.limits.depth_limit)
            .build()?;

        let response = self.rest_client.depth(params).await?;
        let data = response.data().await?;

        let bids = convert_levels(data.bids.unwrap_or_default()).context("parsing bids")?;
        let asks = convert_levels(data.asks.unwrap_or_default()).context("parsing asks")?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_order_book_depth {
            log::info!("{} depth: {} bids / {} asks", pair, bids.len(), asks.len());
        }

        Ok(OrderBookSnapshot::new(bids, asks))
    }
}

#[async_trait]
impl MarketDataClient for BinanceMarketData {
    async fn fetch_candles(
        &self,
        pair: &TradingPair,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        self.load_klines(pair, interval, limit).await.map_err(|e| {
            log_connector_error(&format!("{} {}", pair, interval), &e);
            MarketDataError::DataUnavailable(format!("{:#}", e))
        })
    }

    async fn fetch_order_book(
        &self,
        pair: &TradingPair,
    ) -> Result<OrderBookSnapshot, MarketDataError> {
        self.load_depth(pair).await.map_err(|e| {
            log_connector_error(&pair.to_string(), &e);
            MarketDataError::OrderBookUnavailable(format!("{:#}", e))
        })
    }

    fn signature(&self) -> &'static str {
        "Binance Spot REST"
    }
}

/// Every user-facing string in the desktop UI.
pub struct UiText {
    pub window_title: &'static str,
    pub controls_heading: &'static str,
    pub pair_label: &'static str,
    pub pair_hint: &'static str,
    pub interval_label: &'static str,
    pub fetch_button: &'static str,
    pub fetching: &'static str,
    pub idle_prompt: &'static str,
    pub candles_heading: &'static str,
    pub bids_heading: &'static str,
    pub asks_heading: &'static str,
    pub depth_heading: &'static str,
    pub open_interest_heading: &'static str,
    pub synthetic_tag: &'static str,
    pub verdict_heading: &'static str,
    pub no_levels: &'static str,
    pub plot_price_axis: &'static str,
    pub plot_time_axis: &'static str,
    pub plot_volume_axis: &'static str,
    pub plot_open_interest_axis: &'static str,
    pub legend_bullish: &'static str,
    pub legend_bearish: &'static str,
    pub legend_bids: &'static str,
    pub legend_asks: &'static str,
    pub source_label: &'static str,
    pub generated_label: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "OI Scanner - Price & Open Interest Direction",
    controls_heading: "Scan",
    pair_label: "Trading pair",
    pair_hint: "e.g. BTC/USDT",
    interval_label: "Interval",
    fetch_button: "Fetch & Analyze",
    fetching: "Fetching market data...",
    idle_prompt: "Enter a pair and press Fetch & Analyze.",
    candles_heading: "Candles",
    bids_heading: "Top Bids",
    asks_heading: "Top Asks",
    depth_heading: "Order Book Depth",
    open_interest_heading: "Open Interest",
    synthetic_tag: "(synthetic: random values, not market data)",
    verdict_heading: "Direction",
    no_levels: "No levels",
    plot_price_axis: "Price",
    plot_time_axis: "Time (UTC)",
    plot_volume_axis: "Volume",
    plot_open_interest_axis: "OI",
    legend_bullish: "Bullish candles",
    legend_bearish: "Bearish candles",
    legend_bids: "Bids",
    legend_asks: "Asks",
    source_label: "OI source",
    generated_label: "Generated",
};

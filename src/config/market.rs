//! Mock market tuning: seed pairs, tick cadence and generator bands.

/// A trading pair as it exists before the first simulated tick.
pub struct SeedPair {
    pub symbol: &'static str,
    pub base_asset: &'static str,
    pub quote_asset: &'static str,
    pub price: f64,
    pub change_24h: f64,
    pub volume_24h: f64,
}

pub struct MarketConfig {
    pub seed_pairs: &'static [SeedPair],

    /// Milliseconds between simulated price updates.
    pub tick_interval_ms: u64,
    /// Max per-tick price move, as a fraction (0.001 = ±0.1%).
    pub max_tick_move_pct: f64,
    /// 24h change display is clamped to ±this many percent.
    pub change_24h_clamp: f64,
    /// Max per-tick 24h-volume drift, as a fraction.
    pub max_volume_drift_pct: f64,

    // Order book synthesis
    pub book_levels_per_side: usize,
    /// Gap between adjacent book levels, as a fraction of the mid price.
    pub book_level_step_pct: f64,
    pub book_amount_min: f64,
    pub book_amount_span: f64,

    // Market trade synthesis
    pub trades_default_limit: usize,
    /// Trade prints land within ±this fraction of the mid price.
    pub trade_price_band_pct: f64,
    pub trade_amount_min: f64,
    pub trade_amount_span: f64,

    // Candle synthesis
    pub candles_default_limit: usize,
    /// Per-candle volatility as a fraction of the anchor price.
    pub candle_volatility_pct: f64,
    /// Random walk is re-seeded when it drifts outside ±this fraction of the anchor.
    pub candle_drift_band_pct: f64,
    /// Band the walk is re-seeded into.
    pub candle_reseed_band_pct: f64,

    // Paper account
    pub quote_balance: f64,
    /// Flat taker/maker fee estimate shown in the order form (0.001 = 0.1%).
    pub fee_rate: f64,
}

pub const MARKET: MarketConfig = MarketConfig {
    seed_pairs: &[
        SeedPair {
            symbol: "BTCUSDT",
            base_asset: "BTC",
            quote_asset: "USDT",
            price: 43250.50,
            change_24h: 2.45,
            volume_24h: 12_456.78,
        },
        SeedPair {
            symbol: "ETHUSDT",
            base_asset: "ETH",
            quote_asset: "USDT",
            price: 2650.75,
            change_24h: -1.23,
            volume_24h: 98_340.20,
        },
        SeedPair {
            symbol: "BNBUSDT",
            base_asset: "BNB",
            quote_asset: "USDT",
            price: 315.20,
            change_24h: 3.67,
            volume_24h: 44_812.00,
        },
        SeedPair {
            symbol: "ADAUSDT",
            base_asset: "ADA",
            quote_asset: "USDT",
            price: 0.4521,
            change_24h: -0.89,
            volume_24h: 25_731_400.0,
        },
        SeedPair {
            symbol: "SOLUSDT",
            base_asset: "SOL",
            quote_asset: "USDT",
            price: 98.45,
            change_24h: 5.12,
            volume_24h: 891_220.5,
        },
    ],

    tick_interval_ms: 2000,
    max_tick_move_pct: 0.001,
    change_24h_clamp: 15.0,
    max_volume_drift_pct: 0.02,

    book_levels_per_side: 20,
    book_level_step_pct: 0.001,
    book_amount_min: 0.1,
    book_amount_span: 10.0,

    trades_default_limit: 50,
    trade_price_band_pct: 0.01,
    trade_amount_min: 0.01,
    trade_amount_span: 5.0,

    candles_default_limit: 100,
    candle_volatility_pct: 0.002,
    candle_drift_band_pct: 0.10,
    candle_reseed_band_pct: 0.025,

    quote_balance: 10_000.0,
    fee_rate: 0.001,
};

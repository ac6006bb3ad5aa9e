//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Emit a line for every simulated price tick (noisy at 2s cadence).
    pub log_price_ticks: bool,

    /// Log order submission/cancellation traffic.
    pub log_order_events: bool,

    /// Log pair selection changes.
    pub log_pair_selection: bool,

    /// Log candle series regeneration (pair/interval switches).
    pub log_candle_reloads: bool,
}

pub const DF: LogFlags = LogFlags {
    log_price_ticks: false,
    log_order_events: true,
    log_pair_selection: true,
    log_candle_reloads: false,
};

//! Random-walk generators behind the mock service. Everything takes the
//! service's RNG so a seeded run is fully reproducible.

use rand::Rng;
use uuid::Uuid;

use crate::config::MARKET;
use crate::domain::{BookLevel, Candle, ChartInterval, MarketTrade, OrderBook, TradingPair};
use crate::utils::TimeUtils;

/// Apply one simulated tick to a pair: price moves by a uniform fraction in
/// ±max_tick_move_pct, the 24h change accumulates the move (clamped), and
/// the 24h volume drifts so volume-sorted lists stay alive.
pub fn tick_pair<R: Rng>(rng: &mut R, pair: &mut TradingPair) {
    let move_pct = rng.gen_range(-MARKET.max_tick_move_pct..=MARKET.max_tick_move_pct);
    pair.price *= 1.0 + move_pct;

    pair.change_24h = (pair.change_24h + move_pct * 100.0)
        .clamp(-MARKET.change_24h_clamp, MARKET.change_24h_clamp);

    let vol_drift = rng.gen_range(-MARKET.max_volume_drift_pct..=MARKET.max_volume_drift_pct);
    pair.volume_24h = (pair.volume_24h * (1.0 + vol_drift)).max(0.0);
}

/// Synthesize a ladder of bids and asks around `mid`. Asks step up and bids
/// step down by `book_level_step_pct` per level; cumulative totals are the
/// running sum from the touch outwards.
pub fn order_book<R: Rng>(rng: &mut R, mid: f64) -> OrderBook {
    let levels = MARKET.book_levels_per_side;
    let step = mid * MARKET.book_level_step_pct;

    let mut asks = Vec::with_capacity(levels);
    let mut bids = Vec::with_capacity(levels);

    let mut ask_total = 0.0;
    let mut bid_total = 0.0;

    for i in 1..=levels {
        let amount = rng.gen_range(0.0..MARKET.book_amount_span) + MARKET.book_amount_min;
        ask_total += amount;
        asks.push(BookLevel {
            price: mid + i as f64 * step,
            amount,
            cumulative: ask_total,
        });

        let amount = rng.gen_range(0.0..MARKET.book_amount_span) + MARKET.book_amount_min;
        bid_total += amount;
        bids.push(BookLevel {
            price: (mid - i as f64 * step).max(0.0),
            amount,
            cumulative: bid_total,
        });
    }

    OrderBook { asks, bids }
}

/// A batch of recent tape prints, one second apart, newest first.
pub fn market_trades<R: Rng>(rng: &mut R, mid: f64, limit: usize, now_ms: i64) -> Vec<MarketTrade> {
    let mut trades: Vec<MarketTrade> = (0..limit)
        .map(|i| tape_trade(rng, mid, now_ms - i as i64 * TimeUtils::MS_IN_S))
        .collect();

    trades.sort_by_key(|t| std::cmp::Reverse(t.timestamp_ms));
    trades
}

/// One synthetic tape print within the configured band of `mid`.
pub fn tape_trade<R: Rng>(rng: &mut R, mid: f64, timestamp_ms: i64) -> MarketTrade {
    let band = MARKET.trade_price_band_pct;
    let price = mid * (1.0 + rng.gen_range(-band..=band));
    let amount = rng.gen_range(0.0..MARKET.trade_amount_span) + MARKET.trade_amount_min;

    MarketTrade {
        id: Uuid::new_v4().to_string(),
        price,
        amount,
        is_buy: rng.gen_bool(0.5),
        timestamp_ms,
    }
}

/// Random-walk OHLCV series anchored at `anchor`. Each candle's close seeds
/// the next open; the walk is pulled back into the reseed band whenever it
/// strays outside the drift band, so the series never wanders off screen.
pub fn candles<R: Rng>(
    rng: &mut R,
    anchor: f64,
    interval: ChartInterval,
    limit: usize,
    now_ms: i64,
) -> Vec<Candle> {
    let interval_ms = interval.interval_ms();
    let volatility = anchor * MARKET.candle_volatility_pct;
    let drift_band = MARKET.candle_drift_band_pct;
    let reseed_band = MARKET.candle_reseed_band_pct;

    let mut series = Vec::with_capacity(limit);
    let mut current = anchor;

    for i in 0..limit {
        let time = now_ms - (limit - i) as i64 * interval_ms;

        current += rng.gen_range(-1.0..=1.0) * volatility;
        if current > anchor * (1.0 + drift_band) || current < anchor * (1.0 - drift_band) {
            current = anchor * (1.0 + rng.gen_range(-reseed_band..=reseed_band));
        }

        let open = current;
        let close = open + rng.gen_range(-1.0..=1.0) * volatility;
        let high = open.max(close) + rng.gen_range(0.0..=1.0) * volatility;
        let low = open.min(close) - rng.gen_range(0.0..=1.0) * volatility;
        let volume = rng.gen_range(0.0..0.5) * anchor + 0.1 * anchor;

        series.push(Candle::new(time, open, high, low, close, volume));
        current = close;
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn seed_pair() -> TradingPair {
        TradingPair::from(&MARKET.seed_pairs[0])
    }

    #[test]
    fn tick_moves_price_within_band() {
        let mut rng = rng();
        let mut pair = seed_pair();
        let before = pair.price;

        tick_pair(&mut rng, &mut pair);

        let move_pct = (pair.price - before).abs() / before;
        assert!(move_pct <= MARKET.max_tick_move_pct + 1e-12);
    }

    #[test]
    fn change_24h_is_clamped() {
        let mut rng = rng();
        let mut pair = seed_pair();

        for _ in 0..10_000 {
            tick_pair(&mut rng, &mut pair);
            assert!(pair.change_24h.abs() <= MARKET.change_24h_clamp);
        }
    }

    #[test]
    fn book_sides_are_ordered_with_monotone_totals() {
        let mut rng = rng();
        let book = order_book(&mut rng, 43_250.50);

        assert_eq!(book.asks.len(), MARKET.book_levels_per_side);
        assert_eq!(book.bids.len(), MARKET.book_levels_per_side);

        assert!(book.asks.windows(2).all(|w| w[0].price < w[1].price));
        assert!(book.bids.windows(2).all(|w| w[0].price > w[1].price));
        assert!(book.asks.windows(2).all(|w| w[0].cumulative < w[1].cumulative));
        assert!(book.bids.windows(2).all(|w| w[0].cumulative < w[1].cumulative));

        // Best ask above mid, best bid below.
        assert!(book.asks[0].price > 43_250.50);
        assert!(book.bids[0].price < 43_250.50);
    }

    #[test]
    fn trades_are_newest_first_with_requested_count() {
        let mut rng = rng();
        let now = 1_700_000_000_000;
        let trades = market_trades(&mut rng, 100.0, 25, now);

        assert_eq!(trades.len(), 25);
        assert!(trades.windows(2).all(|w| w[0].timestamp_ms >= w[1].timestamp_ms));
        assert_eq!(trades[0].timestamp_ms, now);

        for t in &trades {
            assert!((t.price - 100.0).abs() <= 100.0 * MARKET.trade_price_band_pct + 1e-9);
            assert!(t.amount >= MARKET.trade_amount_min);
        }
    }

    #[test]
    fn candles_are_coherent() {
        let mut rng = rng();
        let now = 1_700_000_000_000;
        let anchor = 2650.75;
        let series = candles(&mut rng, anchor, ChartInterval::FiveMinutes, 100, now);

        assert_eq!(series.len(), 100);

        for pair in series.windows(2) {
            assert_eq!(
                pair[1].timestamp_ms - pair[0].timestamp_ms,
                ChartInterval::FiveMinutes.interval_ms()
            );
        }

        for c in &series {
            assert!(c.high >= c.open.max(c.close));
            assert!(c.low <= c.open.min(c.close));
            assert!(c.volume > 0.0);
            // Walk must stay near the anchor (drift band plus wick slack).
            assert!((c.close - anchor).abs() / anchor < MARKET.candle_drift_band_pct + 0.01);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = candles(&mut rng(), 100.0, ChartInterval::OneMinute, 10, 0);
        let b = candles(&mut rng(), 100.0, ChartInterval::OneMinute, 10, 0);
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(&b).all(|(x, y)| x.close == y.close));
    }
}

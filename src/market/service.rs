use std::sync::mpsc::Receiver;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use uuid::Uuid;

use crate::config::{DF, MARKET};
use crate::domain::{
    Candle, ChartInterval, MarketTrade, Order, OrderBook, OrderRejected, OrderSide, OrderStatus,
    OrderTicket, OrderType, PriceTick, TradeFill, TradingPair,
};
use crate::market::hub::{EventHub, EventKind, MarketEvent, SubscriptionId};
use crate::market::sim;
use crate::utils::{AppInstant, TimeUtils};

/// Fallback anchor when candles are requested for a symbol we don't carry.
const UNKNOWN_SYMBOL_ANCHOR: f64 = 45_000.0;

/// The in-memory mock backend. Owns the pair list, the paper account and the
/// event hub; the frame loop pumps [`MarketDataService::tick`] to drive the
/// simulated market.
pub struct MarketDataService {
    pairs: Vec<TradingPair>,
    current_idx: usize,
    hub: EventHub,
    rng: SmallRng,

    open_orders: Vec<Order>,
    order_history: Vec<Order>,
    trade_history: Vec<TradeFill>,

    updates_running: bool,
    tick_interval: Duration,
    last_tick: Option<AppInstant>,
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new(MARKET.tick_interval_ms)
    }
}

impl MarketDataService {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self::with_rng(SmallRng::from_entropy(), tick_interval_ms)
    }

    /// Deterministic service for tests.
    pub fn with_seed(seed: u64, tick_interval_ms: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed), tick_interval_ms)
    }

    fn with_rng(rng: SmallRng, tick_interval_ms: u64) -> Self {
        let now_ms = TimeUtils::now_timestamp_ms();
        let pairs: Vec<TradingPair> = MARKET.seed_pairs.iter().map(TradingPair::from).collect();

        Self {
            pairs,
            current_idx: 0,
            hub: EventHub::new(),
            rng,
            open_orders: seed_open_orders(now_ms),
            order_history: seed_order_history(now_ms),
            trade_history: seed_trade_history(now_ms),
            updates_running: false,
            tick_interval: Duration::from_millis(tick_interval_ms),
            last_tick: None,
        }
    }

    // --- PAIRS ---

    pub fn trading_pairs(&self) -> &[TradingPair] {
        &self.pairs
    }

    pub fn current_pair(&self) -> &TradingPair {
        &self.pairs[self.current_idx]
    }

    /// Switch the active pair. An unknown symbol is a silent no-op.
    pub fn set_current_pair(&mut self, symbol: &str) {
        match self.pairs.iter().position(|p| p.symbol == symbol) {
            Some(idx) => {
                self.current_idx = idx;
                if DF.log_pair_selection {
                    log::info!("Selected pair: {}", symbol);
                }
                let pair = self.pairs[idx].clone();
                self.hub.notify(MarketEvent::TradingPairChanged(pair));
            }
            None => {
                log::debug!("Ignoring selection of unknown pair {}", symbol);
            }
        }
    }

    pub fn current_price(&self, symbol: &str) -> Option<PriceTick> {
        self.pairs
            .iter()
            .find(|p| p.symbol == symbol)
            .map(PriceTick::from)
    }

    fn price_or_current(&self, symbol: &str) -> f64 {
        self.pairs
            .iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.price)
            .unwrap_or_else(|| self.current_pair().price)
    }

    // --- SYNTHETIC MARKET DATA ---

    pub fn order_book(&mut self, symbol: &str) -> OrderBook {
        let mid = self.price_or_current(symbol);
        sim::order_book(&mut self.rng, mid)
    }

    pub fn market_trades(&mut self, symbol: &str, limit: usize) -> Vec<MarketTrade> {
        let mid = self.price_or_current(symbol);
        sim::market_trades(&mut self.rng, mid, limit, TimeUtils::now_timestamp_ms())
    }

    pub fn candlestick_data(
        &mut self,
        symbol: &str,
        interval: ChartInterval,
        limit: usize,
    ) -> Vec<Candle> {
        let anchor = self
            .pairs
            .iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.price)
            .unwrap_or(UNKNOWN_SYMBOL_ANCHOR);

        sim::candles(
            &mut self.rng,
            anchor,
            interval,
            limit,
            TimeUtils::now_timestamp_ms(),
        )
    }

    // --- PAPER ACCOUNT ---

    pub fn quote_balance(&self) -> f64 {
        MARKET.quote_balance
    }

    pub fn user_orders(&self) -> &[Order] {
        &self.open_orders
    }

    pub fn order_history(&self) -> &[Order] {
        &self.order_history
    }

    pub fn trade_history(&self) -> &[TradeFill] {
        &self.trade_history
    }

    /// Validate and book a new order. The accepted order lands at the top of
    /// the open list and is announced via `OrderPlaced`; nothing ever fills
    /// it (there is no matching engine behind the mock).
    pub fn submit_order(&mut self, ticket: OrderTicket) -> Result<Order, OrderRejected> {
        ticket.validate()?;

        let (base_asset, quote_asset) = self
            .pairs
            .iter()
            .find(|p| p.symbol == ticket.symbol)
            .map(|p| (p.base_asset.clone(), p.quote_asset.clone()))
            .unwrap_or_else(|| (ticket.symbol.clone(), String::new()));

        let order = Order {
            id: Uuid::new_v4().to_string(),
            symbol: ticket.symbol,
            base_asset,
            quote_asset,
            side: ticket.side,
            order_type: ticket.order_type,
            amount: ticket.amount,
            price: ticket.price.unwrap_or(0.0),
            filled: 0.0,
            status: OrderStatus::Open,
            timestamp_ms: TimeUtils::now_timestamp_ms(),
        };

        if DF.log_order_events {
            log::info!(
                "Order placed: {} {} {} {} @ {}",
                order.side,
                order.amount,
                order.symbol,
                order.order_type,
                if order.order_type == OrderType::Market {
                    "market".to_string()
                } else {
                    format!("{}", order.price)
                }
            );
        }

        self.open_orders.insert(0, order.clone());
        self.hub.notify(MarketEvent::OrderPlaced(order.clone()));
        Ok(order)
    }

    /// Cancel an open order: it is restamped and moved to the top of the
    /// order history. Unknown ids return false.
    pub fn cancel_order(&mut self, order_id: &str) -> bool {
        let Some(idx) = self.open_orders.iter().position(|o| o.id == order_id) else {
            return false;
        };

        let mut order = self.open_orders.remove(idx);
        order.status = OrderStatus::Cancelled;
        order.timestamp_ms = TimeUtils::now_timestamp_ms();

        if DF.log_order_events {
            log::info!("Order {} cancelled", order.id);
        }

        self.order_history.insert(0, order);
        true
    }

    // --- EVENT HUB ---

    pub fn subscribe(&mut self, kind: EventKind) -> (SubscriptionId, Receiver<MarketEvent>) {
        self.hub.subscribe(kind)
    }

    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) {
        self.hub.unsubscribe(kind, id);
    }

    pub fn notify(&self, event: MarketEvent) {
        self.hub.notify(event);
    }

    // --- TICK LOOP ---

    pub fn start_price_updates(&mut self) {
        self.updates_running = true;
    }

    pub fn stop_price_updates(&mut self) {
        self.updates_running = false;
    }

    pub fn updates_running(&self) -> bool {
        self.updates_running
    }

    /// Advance the simulation if a full interval has elapsed. Called from the
    /// frame loop; returns true when a tick actually fired. Every pair is
    /// re-priced, `PriceUpdate` carries the whole batch, and one synthetic
    /// tape print is emitted for the active pair.
    pub fn tick(&mut self, now: AppInstant) -> bool {
        if !self.updates_running {
            return false;
        }

        let Some(last) = self.last_tick else {
            // First call after starting just arms the timer.
            self.last_tick = Some(now);
            return false;
        };

        if now.duration_since(last) < self.tick_interval {
            return false;
        }
        self.last_tick = Some(now);

        for pair in &mut self.pairs {
            sim::tick_pair(&mut self.rng, pair);
        }

        let ticks: Vec<PriceTick> = self.pairs.iter().map(PriceTick::from).collect();

        if DF.log_price_ticks {
            let current = self.current_pair();
            log::debug!("Tick: {} at {:.4}", current.symbol, current.price);
        }

        self.hub.notify(MarketEvent::PriceUpdate(ticks));

        let current = self.current_pair();
        let symbol = current.symbol.clone();
        let mid = current.price;
        let trade = sim::tape_trade(&mut self.rng, mid, TimeUtils::now_timestamp_ms());
        self.hub
            .notify(MarketEvent::TradeExecuted { symbol, trade });

        true
    }
}

// --- SEED ACCOUNT DATA ---
// Mirrors the demo account every fresh session starts with.

fn seed_open_orders(now_ms: i64) -> Vec<Order> {
    vec![
        Order {
            id: "order_1".to_string(),
            symbol: "BTCUSDT".to_string(),
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            amount: 0.15,
            price: 43_000.0,
            filled: 0.075,
            status: OrderStatus::PartiallyFilled,
            timestamp_ms: now_ms - TimeUtils::MS_IN_H,
        },
        Order {
            id: "order_2".to_string(),
            symbol: "ETHUSDT".to_string(),
            base_asset: "ETH".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Sell,
            order_type: OrderType::Limit,
            amount: 2.0,
            price: 2_700.0,
            filled: 0.0,
            status: OrderStatus::Open,
            timestamp_ms: now_ms - 2 * TimeUtils::MS_IN_H,
        },
    ]
}

fn seed_order_history(now_ms: i64) -> Vec<Order> {
    vec![
        Order {
            id: "order_3".to_string(),
            symbol: "BTCUSDT".to_string(),
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            amount: 0.05,
            price: 43_180.50,
            filled: 0.05,
            status: OrderStatus::Filled,
            timestamp_ms: now_ms - TimeUtils::MS_IN_D,
        },
        Order {
            id: "order_4".to_string(),
            symbol: "ETHUSDT".to_string(),
            base_asset: "ETH".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Sell,
            order_type: OrderType::Limit,
            amount: 1.5,
            price: 2_650.0,
            filled: 1.5,
            status: OrderStatus::Filled,
            timestamp_ms: now_ms - 2 * TimeUtils::MS_IN_D,
        },
        Order {
            id: "order_5".to_string(),
            symbol: "ADAUSDT".to_string(),
            base_asset: "ADA".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            amount: 1_000.0,
            price: 0.45,
            filled: 0.0,
            status: OrderStatus::Cancelled,
            timestamp_ms: now_ms - 3 * TimeUtils::MS_IN_D,
        },
    ]
}

fn seed_trade_history(now_ms: i64) -> Vec<TradeFill> {
    vec![
        TradeFill {
            id: "trade_1".to_string(),
            symbol: "BTCUSDT".to_string(),
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Buy,
            amount: 0.05,
            price: 43_180.50,
            fee: 2.159,
            timestamp_ms: now_ms - TimeUtils::MS_IN_D,
        },
        TradeFill {
            id: "trade_2".to_string(),
            symbol: "ETHUSDT".to_string(),
            base_asset: "ETH".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Sell,
            amount: 1.5,
            price: 2_650.0,
            fee: 3.975,
            timestamp_ms: now_ms - 2 * TimeUtils::MS_IN_D,
        },
        TradeFill {
            id: "trade_3".to_string(),
            symbol: "BTCUSDT".to_string(),
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            side: OrderSide::Buy,
            amount: 0.025,
            price: 42_800.0,
            fee: 1.070,
            timestamp_ms: now_ms - 4 * TimeUtils::MS_IN_D,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MarketDataService {
        MarketDataService::with_seed(42, 2000)
    }

    #[test]
    fn starts_on_first_seed_pair() {
        let svc = service();
        assert_eq!(svc.current_pair().symbol, "BTCUSDT");
        assert_eq!(svc.trading_pairs().len(), 5);
    }

    #[test]
    fn set_current_pair_switches_and_notifies() {
        let mut svc = service();
        let (_, rx) = svc.subscribe(EventKind::TradingPairChanged);

        svc.set_current_pair("ETHUSDT");

        assert_eq!(svc.current_pair().symbol, "ETHUSDT");
        match rx.try_recv().unwrap() {
            MarketEvent::TradingPairChanged(pair) => assert_eq!(pair.symbol, "ETHUSDT"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn unknown_pair_selection_is_a_no_op() {
        let mut svc = service();
        let (_, rx) = svc.subscribe(EventKind::TradingPairChanged);

        svc.set_current_pair("DOGEUSDT");

        assert_eq!(svc.current_pair().symbol, "BTCUSDT");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn current_price_for_unknown_symbol_is_none() {
        let svc = service();
        assert!(svc.current_price("DOGEUSDT").is_none());
        assert!(svc.current_price("SOLUSDT").is_some());
    }

    #[test]
    fn tick_respects_interval() {
        let mut svc = service();
        svc.start_price_updates();
        let (_, rx) = svc.subscribe(EventKind::PriceUpdate);

        let t0 = AppInstant::now();
        assert!(!svc.tick(t0)); // arms the timer
        assert!(!svc.tick(t0 + Duration::from_millis(1999)));
        assert!(rx.try_recv().is_err());

        assert!(svc.tick(t0 + Duration::from_millis(2001)));
        match rx.try_recv().unwrap() {
            MarketEvent::PriceUpdate(ticks) => assert_eq!(ticks.len(), 5),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn tick_does_nothing_until_started() {
        let mut svc = service();
        let t0 = AppInstant::now();
        assert!(!svc.tick(t0));
        assert!(!svc.tick(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn stop_freezes_the_simulation() {
        let mut svc = service();
        svc.start_price_updates();
        assert!(svc.updates_running());

        let t0 = AppInstant::now();
        svc.tick(t0);
        svc.stop_price_updates();

        assert!(!svc.updates_running());
        assert!(!svc.tick(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn tick_emits_tape_trade_for_current_pair() {
        let mut svc = service();
        svc.start_price_updates();
        svc.set_current_pair("SOLUSDT");
        let (_, rx) = svc.subscribe(EventKind::TradeExecuted);

        let t0 = AppInstant::now();
        svc.tick(t0);
        svc.tick(t0 + Duration::from_millis(2001));

        match rx.try_recv().unwrap() {
            MarketEvent::TradeExecuted { symbol, trade } => {
                assert_eq!(symbol, "SOLUSDT");
                assert!(trade.price > 0.0);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn submit_order_books_and_notifies() {
        let mut svc = service();
        let (_, rx) = svc.subscribe(EventKind::OrderPlaced);
        let open_before = svc.user_orders().len();

        let order = svc
            .submit_order(OrderTicket {
                symbol: "BTCUSDT".to_string(),
                side: OrderSide::Buy,
                order_type: OrderType::Limit,
                amount: 0.25,
                price: Some(42_000.0),
            })
            .unwrap();

        assert_eq!(svc.user_orders().len(), open_before + 1);
        assert_eq!(svc.user_orders()[0].id, order.id);
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.base_asset, "BTC");

        match rx.try_recv().unwrap() {
            MarketEvent::OrderPlaced(placed) => assert_eq!(placed.id, order.id),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn submit_order_rejects_bad_tickets() {
        let mut svc = service();
        let err = svc
            .submit_order(OrderTicket {
                symbol: "BTCUSDT".to_string(),
                side: OrderSide::Buy,
                order_type: OrderType::Limit,
                amount: 0.0,
                price: Some(42_000.0),
            })
            .unwrap_err();
        assert_eq!(err, OrderRejected::InvalidAmount);
    }

    #[test]
    fn cancel_moves_order_to_history() {
        let mut svc = service();
        let history_before = svc.order_history().len();

        assert!(svc.cancel_order("order_2"));

        assert!(svc.user_orders().iter().all(|o| o.id != "order_2"));
        assert_eq!(svc.order_history().len(), history_before + 1);
        assert_eq!(svc.order_history()[0].id, "order_2");
        assert_eq!(svc.order_history()[0].status, OrderStatus::Cancelled);
    }

    #[test]
    fn cancel_unknown_order_is_refused() {
        let mut svc = service();
        assert!(!svc.cancel_order("nope"));
    }

    #[test]
    fn order_book_uses_symbol_price() {
        let mut svc = service();
        let book = svc.order_book("ADAUSDT");
        // ADA trades well under a dollar; the ladder must sit near it.
        assert!(book.asks[0].price < 1.0);
        assert!(book.bids[0].price > 0.0);
    }

    #[test]
    fn candles_fall_back_for_unknown_symbol() {
        let mut svc = service();
        let series = svc.candlestick_data("DOGEUSDT", ChartInterval::OneMinute, 10);
        assert_eq!(series.len(), 10);
        assert!((series[0].close - UNKNOWN_SYMBOL_ANCHOR).abs() < UNKNOWN_SYMBOL_ANCHOR * 0.15);
    }
}

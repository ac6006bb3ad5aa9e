use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::domain::{MarketTrade, Order, PriceTick, TradingPair};

/// Everything the mock service can announce to the rest of the app.
#[derive(Debug, Clone)]
pub enum MarketEvent {
    /// All pairs were re-priced by the tick loop.
    PriceUpdate(Vec<PriceTick>),
    TradingPairChanged(TradingPair),
    OrderPlaced(Order),
    /// A synthetic tape print for `symbol`.
    TradeExecuted { symbol: String, trade: MarketTrade },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PriceUpdate,
    TradingPairChanged,
    OrderPlaced,
    TradeExecuted,
}

impl MarketEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            MarketEvent::PriceUpdate(_) => EventKind::PriceUpdate,
            MarketEvent::TradingPairChanged(_) => EventKind::TradingPairChanged,
            MarketEvent::OrderPlaced(_) => EventKind::OrderPlaced,
            MarketEvent::TradeExecuted { .. } => EventKind::TradeExecuted,
        }
    }
}

/// Handle returned by [`EventHub::subscribe`]; needed to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Per-event fan-out lists. Subscribers are plain mpsc senders kept in
/// registration order, with no deduplication; `notify` walks the list and
/// ignores send failures, so a subscription whose receiver was dropped
/// lingers until it is explicitly unsubscribed.
#[derive(Default)]
pub struct EventHub {
    subscribers: HashMap<EventKind, Vec<(SubscriptionId, Sender<MarketEvent>)>>,
    next_id: u64,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind) -> (SubscriptionId, Receiver<MarketEvent>) {
        let (tx, rx) = mpsc::channel();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.entry(kind).or_default().push((id, tx));
        (id, rx)
    }

    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) {
        if let Some(list) = self.subscribers.get_mut(&kind) {
            list.retain(|(sub_id, _)| *sub_id != id);
        }
    }

    /// Synchronous fan-out in registration order.
    pub fn notify(&self, event: MarketEvent) {
        if let Some(list) = self.subscribers.get(&event.kind()) {
            for (_, tx) in list {
                let _ = tx.send(event.clone());
            }
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_event(symbol: &str) -> MarketEvent {
        MarketEvent::PriceUpdate(vec![PriceTick {
            symbol: symbol.to_string(),
            price: 1.0,
            change_24h: 0.0,
        }])
    }

    fn event_symbol(event: &MarketEvent) -> String {
        match event {
            MarketEvent::PriceUpdate(ticks) => ticks[0].symbol.clone(),
            _ => panic!("unexpected event"),
        }
    }

    #[test]
    fn delivers_in_emission_order() {
        let mut hub = EventHub::new();
        let (_, rx) = hub.subscribe(EventKind::PriceUpdate);

        hub.notify(pair_event("A"));
        hub.notify(pair_event("B"));

        assert_eq!(event_symbol(&rx.recv().unwrap()), "A");
        assert_eq!(event_symbol(&rx.recv().unwrap()), "B");
    }

    #[test]
    fn all_subscribers_receive() {
        let mut hub = EventHub::new();
        let (_, rx1) = hub.subscribe(EventKind::PriceUpdate);
        let (_, rx2) = hub.subscribe(EventKind::PriceUpdate);

        hub.notify(pair_event("A"));

        assert_eq!(event_symbol(&rx1.recv().unwrap()), "A");
        assert_eq!(event_symbol(&rx2.recv().unwrap()), "A");
    }

    #[test]
    fn duplicate_subscriptions_are_not_deduplicated() {
        let mut hub = EventHub::new();
        let (_, _rx1) = hub.subscribe(EventKind::PriceUpdate);
        let (_, _rx2) = hub.subscribe(EventKind::PriceUpdate);

        assert_eq!(hub.subscriber_count(EventKind::PriceUpdate), 2);
    }

    #[test]
    fn unsubscribed_id_stops_receiving() {
        let mut hub = EventHub::new();
        let (id, rx) = hub.subscribe(EventKind::PriceUpdate);

        hub.unsubscribe(EventKind::PriceUpdate, id);
        hub.notify(pair_event("A"));

        assert!(rx.try_recv().is_err());
        assert_eq!(hub.subscriber_count(EventKind::PriceUpdate), 0);
    }

    #[test]
    fn dangling_receiver_does_not_break_notify() {
        let mut hub = EventHub::new();
        let (_, rx_dead) = hub.subscribe(EventKind::PriceUpdate);
        drop(rx_dead);
        let (_, rx_live) = hub.subscribe(EventKind::PriceUpdate);

        hub.notify(pair_event("A"));

        // Dead subscription stays registered; live one still gets the event.
        assert_eq!(hub.subscriber_count(EventKind::PriceUpdate), 2);
        assert_eq!(event_symbol(&rx_live.recv().unwrap()), "A");
    }

    #[test]
    fn events_are_routed_by_kind() {
        let mut hub = EventHub::new();
        let (_, rx) = hub.subscribe(EventKind::OrderPlaced);

        hub.notify(pair_event("A"));

        assert!(rx.try_recv().is_err());
    }
}

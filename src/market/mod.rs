// The in-memory mock backend: data service, event hub and the
// random-walk generators behind it.
mod hub;
mod service;
pub(crate) mod sim;

pub use hub::{EventHub, EventKind, MarketEvent, SubscriptionId};
pub use service::MarketDataService;

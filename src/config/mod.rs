//! Configuration module for the BTrade application.

mod debug;
mod market;
mod persistence;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use debug::DF;
pub use market::{MARKET, MarketConfig, SeedPair};
pub use persistence::PERSISTENCE;

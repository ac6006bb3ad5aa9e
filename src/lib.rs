#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod domain;
pub mod market;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate
pub use config::PERSISTENCE;
pub use market::MarketDataService;
pub use ui::BTradeApp;

// CLI argument parsing
use clap::Parser;

use crate::config::MARKET;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Milliseconds between simulated price updates
    #[arg(long, default_value_t = MARKET.tick_interval_ms)]
    pub tick_ms: u64,

    /// Start with the price simulation paused
    #[arg(long, default_value_t = false)]
    pub frozen: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            tick_ms: MARKET.tick_interval_ms,
            frozen: false,
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> BTradeApp {
    BTradeApp::new(cc, args)
}

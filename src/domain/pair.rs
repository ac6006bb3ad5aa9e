use serde::{Deserialize, Serialize};

use crate::config::SeedPair;

/// A base/quote asset combination with its simulated market stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingPair {
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub price: f64,
    pub change_24h: f64,
    pub volume_24h: f64,
}

impl TradingPair {
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.base_asset, self.quote_asset)
    }
}

impl From<&SeedPair> for TradingPair {
    fn from(seed: &SeedPair) -> Self {
        Self {
            symbol: seed.symbol.to_string(),
            base_asset: seed.base_asset.to_string(),
            quote_asset: seed.quote_asset.to_string(),
            price: seed.price,
            change_24h: seed.change_24h,
            volume_24h: seed.volume_24h,
        }
    }
}

/// Snapshot answer for a single pair's current price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTick {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
}

impl From<&TradingPair> for PriceTick {
    fn from(pair: &TradingPair) -> Self {
        Self {
            symbol: pair.symbol.clone(),
            price: pair.price,
            change_24h: pair.change_24h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MARKET;

    #[test]
    fn display_name_joins_assets() {
        let pair = TradingPair::from(&MARKET.seed_pairs[0]);
        assert_eq!(pair.display_name(), "BTC/USDT");
    }
}

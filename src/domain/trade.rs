use crate::domain::OrderSide;

/// A public tape print (somebody else's trade).
#[derive(Debug, Clone, PartialEq)]
pub struct MarketTrade {
    pub id: String,
    pub price: f64,
    pub amount: f64,
    pub is_buy: bool,
    pub timestamp_ms: i64,
}

/// An executed trade of the user's own, shown in Trade History.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeFill {
    pub id: String,
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub side: OrderSide,
    pub amount: f64,
    pub price: f64,
    pub fee: f64,
    pub timestamp_ms: i64,
}

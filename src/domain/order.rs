use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum OrderSide {
    #[default]
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "Buy"),
            OrderSide::Sell => write!(f, "Sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum OrderType {
    #[default]
    Limit,
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "Limit"),
            OrderType::Market => write!(f, "Market"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Open,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Open => write!(f, "open"),
            OrderStatus::PartiallyFilled => write!(f, "partially filled"),
            OrderStatus::Filled => write!(f, "filled"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Why an order entry was refused at the form gate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderRejected {
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Please enter a valid price")]
    InvalidPrice,
}

/// What the order form hands to the service on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTicket {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub amount: f64,
    /// None for market orders.
    pub price: Option<f64>,
}

impl OrderTicket {
    /// Entry gate: non-positive amount, or a non-positive price on a limit
    /// order, blocks submission. Market orders carry no price to check.
    pub fn validate(&self) -> Result<(), OrderRejected> {
        if !(self.amount > 0.0) {
            return Err(OrderRejected::InvalidAmount);
        }
        if self.order_type == OrderType::Limit && !self.price.map(|p| p > 0.0).unwrap_or(false) {
            return Err(OrderRejected::InvalidPrice);
        }
        Ok(())
    }
}

/// A resting or historical user order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub amount: f64,
    /// 0.0 on market orders (executed at whatever the tape gave).
    pub price: f64,
    pub filled: f64,
    pub status: OrderStatus,
    pub timestamp_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(order_type: OrderType, amount: f64, price: Option<f64>) -> OrderTicket {
        OrderTicket {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            order_type,
            amount,
            price,
        }
    }

    #[test]
    fn rejects_non_positive_amount() {
        let t = ticket(OrderType::Limit, 0.0, Some(43000.0));
        assert_eq!(t.validate(), Err(OrderRejected::InvalidAmount));

        let t = ticket(OrderType::Limit, -1.0, Some(43000.0));
        assert_eq!(t.validate(), Err(OrderRejected::InvalidAmount));
    }

    #[test]
    fn rejects_nan_amount() {
        let t = ticket(OrderType::Market, f64::NAN, None);
        assert_eq!(t.validate(), Err(OrderRejected::InvalidAmount));
    }

    #[test]
    fn limit_order_needs_positive_price() {
        let t = ticket(OrderType::Limit, 0.5, Some(0.0));
        assert_eq!(t.validate(), Err(OrderRejected::InvalidPrice));

        let t = ticket(OrderType::Limit, 0.5, None);
        assert_eq!(t.validate(), Err(OrderRejected::InvalidPrice));
    }

    #[test]
    fn market_order_ignores_price() {
        let t = ticket(OrderType::Market, 0.5, None);
        assert_eq!(t.validate(), Ok(()));
    }

    #[test]
    fn valid_limit_order_passes() {
        let t = ticket(OrderType::Limit, 0.5, Some(43000.0));
        assert_eq!(t.validate(), Ok(()));
    }
}

#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy)]
pub struct Candle {
    pub timestamp_ms: i64,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Candle {
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn get_type(&self) -> CandleType {
        if self.close >= self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    /// Fold a fresh price print into a still-forming candle.
    pub fn apply_price(&mut self, price: f64) {
        self.close = price;
        self.high = self.high.max(price);
        self.low = self.low.min(price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_type_from_body() {
        let bull = Candle::new(0, 10.0, 12.0, 9.0, 11.0, 1.0);
        let bear = Candle::new(0, 11.0, 12.0, 9.0, 10.0, 1.0);
        assert_eq!(bull.get_type(), CandleType::Bullish);
        assert_eq!(bear.get_type(), CandleType::Bearish);
    }

    #[test]
    fn apply_price_widens_range() {
        let mut candle = Candle::new(0, 10.0, 10.5, 9.5, 10.0, 1.0);

        candle.apply_price(11.0);
        assert_eq!(candle.close, 11.0);
        assert_eq!(candle.high, 11.0);

        candle.apply_price(9.0);
        assert_eq!(candle.close, 9.0);
        assert_eq!(candle.low, 9.0);
        // High from the earlier print survives.
        assert_eq!(candle.high, 11.0);
    }
}

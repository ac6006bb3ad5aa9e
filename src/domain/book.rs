/// One price level of the synthetic book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookLevel {
    pub price: f64,
    pub amount: f64,
    /// Running sum of amounts from the top of this side down to here.
    pub cumulative: f64,
}

/// Asks ascend away from the mid price, bids descend. Both carry
/// cumulative totals already computed.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

impl OrderBook {
    /// Largest single-level amount on either side (scales the depth bars).
    pub fn max_amount(&self) -> f64 {
        self.asks
            .iter()
            .chain(self.bids.iter())
            .map(|l| l.amount)
            .fold(0.0, f64::max)
    }

    /// Re-bucket both sides onto a coarser price grid. Levels whose price
    /// rounds into the same bucket are merged; cumulative totals are rebuilt.
    pub fn grouped(&self, tick: f64) -> OrderBook {
        if tick <= 0.0 {
            return self.clone();
        }
        OrderBook {
            asks: group_side(&self.asks, tick, true),
            bids: group_side(&self.bids, tick, false),
        }
    }
}

fn group_side(levels: &[BookLevel], tick: f64, round_up: bool) -> Vec<BookLevel> {
    let mut grouped: Vec<BookLevel> = Vec::new();

    for level in levels {
        // Asks round away from the mid (up), bids round down, so a bucket
        // never advertises a better price than its contents.
        let bucket = if round_up {
            (level.price / tick).ceil() * tick
        } else {
            (level.price / tick).floor() * tick
        };

        match grouped.last_mut() {
            Some(last) if (last.price - bucket).abs() < tick * 0.5 => {
                last.amount += level.amount;
            }
            _ => grouped.push(BookLevel {
                price: bucket,
                amount: level.amount,
                cumulative: 0.0,
            }),
        }
    }

    let mut running = 0.0;
    for level in &mut grouped {
        running += level.amount;
        level.cumulative = running;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(prices: &[f64]) -> Vec<BookLevel> {
        let mut cumulative = 0.0;
        prices
            .iter()
            .map(|&price| {
                cumulative += 1.0;
                BookLevel {
                    price,
                    amount: 1.0,
                    cumulative,
                }
            })
            .collect()
    }

    #[test]
    fn grouping_merges_same_bucket() {
        let book = OrderBook {
            asks: side(&[100.02, 100.04, 100.13]),
            bids: side(&[99.98, 99.96, 99.87]),
        };

        let grouped = book.grouped(0.1);
        assert_eq!(grouped.asks.len(), 2); // 100.1 and 100.2
        assert_eq!(grouped.bids.len(), 2); // 99.9 and 99.8
        assert_eq!(grouped.asks[0].amount, 2.0);
        assert_eq!(grouped.asks[0].cumulative, 2.0);
        assert_eq!(grouped.asks[1].cumulative, 3.0);
    }

    #[test]
    fn grouping_with_zero_tick_is_identity() {
        let book = OrderBook {
            asks: side(&[100.02]),
            bids: side(&[99.98]),
        };
        let grouped = book.grouped(0.0);
        assert_eq!(grouped.asks.len(), 1);
        assert_eq!(grouped.asks[0].price, 100.02);
    }

    #[test]
    fn max_amount_spans_both_sides() {
        let mut book = OrderBook {
            asks: side(&[100.0]),
            bids: side(&[99.0]),
        };
        book.bids[0].amount = 7.5;
        assert_eq!(book.max_amount(), 7.5);
    }
}

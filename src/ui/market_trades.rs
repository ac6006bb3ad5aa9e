use std::sync::mpsc::Receiver;

use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::MARKET;
use crate::config::plot::PLOT_CONFIG;
use crate::domain::MarketTrade;
use crate::market::{EventKind, MarketDataService, MarketEvent, SubscriptionId};
use crate::ui::ui_config::UI_TEXT;
use crate::ui::utils::{format_amount, format_price};
use crate::utils::{TimeUtils, format_relative_time};

/// Rolling tape of recent prints for the active pair.
pub struct MarketTradesState {
    trades: Vec<MarketTrade>,
    loaded_for: Option<String>,
    trade_sub: Option<(SubscriptionId, Receiver<MarketEvent>)>,
}

impl Default for MarketTradesState {
    fn default() -> Self {
        Self {
            trades: Vec::new(),
            loaded_for: None,
            trade_sub: None,
        }
    }
}

impl MarketTradesState {
    pub fn connect(&mut self, service: &mut MarketDataService) {
        self.trade_sub = Some(service.subscribe(EventKind::TradeExecuted));
    }

    pub fn pump(&mut self, service: &mut MarketDataService) {
        let symbol = service.current_pair().symbol.clone();

        if self.loaded_for.as_ref() != Some(&symbol) {
            self.trades = service.market_trades(&symbol, MARKET.trades_default_limit);
            self.loaded_for = Some(symbol.clone());
        }

        let mut incoming = Vec::new();
        if let Some((_, rx)) = &self.trade_sub {
            while let Ok(event) = rx.try_recv() {
                if let MarketEvent::TradeExecuted { symbol: s, trade } = event {
                    if s == symbol {
                        incoming.push(trade);
                    }
                }
            }
        }
        for trade in incoming {
            self.push_trade(trade);
        }
    }

    /// Newest print on top; the tape never grows past the configured window.
    fn push_trade(&mut self, trade: MarketTrade) {
        self.trades.insert(0, trade);
        self.trades.truncate(MARKET.trades_default_limit);
    }

    pub fn render(&mut self, ui: &mut Ui, service: &MarketDataService) {
        let pair = service.current_pair();
        let now_ms = TimeUtils::now_timestamp_ms();

        ui.horizontal(|ui| {
            ui.strong(UI_TEXT.trades_title.as_str());
            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    ui.label(
                        RichText::new(UI_TEXT.trades_live_badge.clone())
                            .small()
                            .color(PLOT_CONFIG.color_info),
                    );
                },
            );
        });

        let subdued = PLOT_CONFIG.color_text_subdued;

        TableBuilder::new(ui)
            .id_salt("market_trades")
            .striped(true)
            .column(Column::remainder())
            .column(Column::remainder())
            .column(Column::remainder())
            .header(16.0, |mut header| {
                header.col(|ui| {
                    ui.label(
                        RichText::new(format!("{} ({})", UI_TEXT.book_col_price, pair.quote_asset))
                            .small()
                            .color(subdued),
                    );
                });
                header.col(|ui| {
                    ui.label(
                        RichText::new(format!("{} ({})", UI_TEXT.book_col_amount, pair.base_asset))
                            .small()
                            .color(subdued),
                    );
                });
                header.col(|ui| {
                    ui.label(RichText::new(UI_TEXT.trades_col_time.clone()).small().color(subdued));
                });
            })
            .body(|mut body| {
                for trade in &self.trades {
                    let side_color = if trade.is_buy {
                        PLOT_CONFIG.color_buy
                    } else {
                        PLOT_CONFIG.color_sell
                    };
                    body.row(16.0, |mut row| {
                        row.col(|ui| {
                            ui.label(
                                RichText::new(format_price(trade.price))
                                    .monospace()
                                    .small()
                                    .color(side_color),
                            );
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(format_amount(trade.amount))
                                    .monospace()
                                    .small()
                                    .color(PLOT_CONFIG.color_text_neutral),
                            );
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(format_relative_time(trade.timestamp_ms, now_ms))
                                    .monospace()
                                    .small()
                                    .color(subdued),
                            );
                        });
                    });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(ts: i64) -> MarketTrade {
        MarketTrade {
            id: format!("t{}", ts),
            price: 100.0,
            amount: 1.0,
            is_buy: true,
            timestamp_ms: ts,
        }
    }

    #[test]
    fn new_prints_land_on_top() {
        let mut state = MarketTradesState::default();
        state.push_trade(trade(1));
        state.push_trade(trade(2));

        assert_eq!(state.trades[0].timestamp_ms, 2);
        assert_eq!(state.trades[1].timestamp_ms, 1);
    }

    #[test]
    fn tape_is_capped() {
        let mut state = MarketTradesState::default();
        for i in 0..(MARKET.trades_default_limit as i64 + 10) {
            state.push_trade(trade(i));
        }

        assert_eq!(state.trades.len(), MARKET.trades_default_limit);
        // Oldest prints were dropped off the end.
        assert_eq!(state.trades[0].timestamp_ms, MARKET.trades_default_limit as i64 + 9);
    }
}

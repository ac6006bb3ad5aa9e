use std::sync::mpsc::Receiver;

use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::plot::PLOT_CONFIG;
use crate::domain::{Order, OrderStatus, TradeFill};
use crate::market::{EventKind, MarketDataService, MarketEvent, SubscriptionId};
use crate::ui::styles::SideColor;
use crate::ui::ui_config::UI_TEXT;
use crate::ui::utils::format_usd;
use crate::utils::epoch_ms_to_date_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum UserOrdersTab {
    #[default]
    Open,
    History,
    Trades,
}

impl UserOrdersTab {
    pub fn label(&self) -> &'static str {
        match self {
            UserOrdersTab::Open => "Open Orders",
            UserOrdersTab::History => "Order History",
            UserOrdersTab::Trades => "Trade History",
        }
    }
}

/// Bottom panel with the user's open orders, order history and fills.
pub struct UserOrdersState {
    pub tab: UserOrdersTab,
    order_sub: Option<(SubscriptionId, Receiver<MarketEvent>)>,
}

impl Default for UserOrdersState {
    fn default() -> Self {
        Self {
            tab: UserOrdersTab::default(),
            order_sub: None,
        }
    }
}

impl UserOrdersState {
    pub fn connect(&mut self, service: &mut MarketDataService) {
        self.order_sub = Some(service.subscribe(EventKind::OrderPlaced));
    }

    pub fn pump(&mut self) {
        // A freshly placed order yanks the panel back to the open tab so the
        // user sees it land.
        if let Some((_, rx)) = &self.order_sub {
            let mut placed = false;
            while let Ok(event) = rx.try_recv() {
                if matches!(event, MarketEvent::OrderPlaced(_)) {
                    placed = true;
                }
            }
            if placed {
                self.tab = UserOrdersTab::Open;
            }
        }
    }

    pub fn render(&mut self, ui: &mut Ui, service: &mut MarketDataService, visible: &mut bool) {
        ui.horizontal(|ui| {
            for tab in UserOrdersTab::iter() {
                if ui.selectable_label(self.tab == tab, tab.label()).clicked() {
                    self.tab = tab;
                }
            }
            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    if ui.small_button("Hide All").clicked() {
                        *visible = false;
                    }
                },
            );
        });
        ui.separator();

        match self.tab {
            UserOrdersTab::Open => self.render_open_orders(ui, service),
            UserOrdersTab::History => render_order_history(ui, service.order_history()),
            UserOrdersTab::Trades => render_trade_history(ui, service.trade_history()),
        }
    }

    fn render_open_orders(&mut self, ui: &mut Ui, service: &mut MarketDataService) {
        let orders: Vec<Order> = service.user_orders().to_vec();
        if orders.is_empty() {
            empty_placard(ui, &UI_TEXT.orders_empty_open, &UI_TEXT.orders_empty_open_hint);
            return;
        }

        let mut cancel_clicked: Option<String> = None;
        let subdued = PLOT_CONFIG.color_text_subdued;

        TableBuilder::new(ui)
            .id_salt("open_orders")
            .striped(true)
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::remainder())
            .column(Column::remainder())
            .column(Column::auto())
            .header(16.0, |mut header| {
                for title in [
                    UI_TEXT.orders_col_date.as_str(),
                    UI_TEXT.orders_col_pair.as_str(),
                    UI_TEXT.orders_col_type.as_str(),
                    UI_TEXT.orders_col_side.as_str(),
                    UI_TEXT.orders_col_amount.as_str(),
                    UI_TEXT.orders_col_price.as_str(),
                    UI_TEXT.orders_col_filled.as_str(),
                    UI_TEXT.orders_col_action.as_str(),
                ] {
                    header.col(|ui| {
                        ui.label(RichText::new(title).small().color(subdued));
                    });
                }
            })
            .body(|mut body| {
                for order in &orders {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(
                                RichText::new(epoch_ms_to_date_string(order.timestamp_ms))
                                    .small()
                                    .color(subdued),
                            );
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(&order.symbol).small().strong());
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(order.order_type.to_string()).small());
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(order.side.to_string())
                                    .small()
                                    .strong()
                                    .color(order.side.color()),
                            );
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(format!("{} {}", order.amount, order.base_asset))
                                    .monospace()
                                    .small(),
                            );
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(price_cell(order)).monospace().small());
                        });
                        row.col(|ui| {
                            ui.label(
                                RichText::new(format!("{}", order.filled)).monospace().small(),
                            );
                        });
                        row.col(|ui| {
                            if ui
                                .small_button(
                                    RichText::new(UI_TEXT.orders_cancel.clone())
                                        .color(PLOT_CONFIG.color_sell),
                                )
                                .clicked()
                            {
                                cancel_clicked = Some(order.id.clone());
                            }
                        });
                    });
                }
            });

        if let Some(order_id) = cancel_clicked {
            service.cancel_order(&order_id);
        }
    }
}

/// Market orders have no resting price worth printing.
fn price_cell(order: &Order) -> String {
    if order.price > 0.0 {
        format_usd(order.price)
    } else {
        "Market".to_string()
    }
}

fn status_color(status: OrderStatus) -> eframe::egui::Color32 {
    match status {
        OrderStatus::Filled => PLOT_CONFIG.color_buy,
        OrderStatus::Cancelled => PLOT_CONFIG.color_sell,
        OrderStatus::Open | OrderStatus::PartiallyFilled => PLOT_CONFIG.color_warning,
    }
}

fn render_order_history(ui: &mut Ui, history: &[Order]) {
    if history.is_empty() {
        empty_placard(ui, &UI_TEXT.orders_empty_history, &UI_TEXT.orders_empty_history_hint);
        return;
    }

    let subdued = PLOT_CONFIG.color_text_subdued;

    TableBuilder::new(ui)
        .id_salt("order_history")
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .column(Column::remainder())
        .header(16.0, |mut header| {
            for title in [
                UI_TEXT.orders_col_date.as_str(),
                UI_TEXT.orders_col_pair.as_str(),
                UI_TEXT.orders_col_type.as_str(),
                UI_TEXT.orders_col_side.as_str(),
                UI_TEXT.orders_col_amount.as_str(),
                UI_TEXT.orders_col_status.as_str(),
            ] {
                header.col(|ui| {
                    ui.label(RichText::new(title).small().color(subdued));
                });
            }
        })
        .body(|mut body| {
            for order in history {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(
                            RichText::new(epoch_ms_to_date_string(order.timestamp_ms))
                                .small()
                                .color(subdued),
                        );
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(&order.symbol).small().strong());
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(order.order_type.to_string()).small());
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(order.side.to_string())
                                .small()
                                .strong()
                                .color(order.side.color()),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format!("{} {}", order.amount, order.base_asset))
                                .monospace()
                                .small(),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(order.status.to_string())
                                .small()
                                .color(status_color(order.status)),
                        );
                    });
                });
            }
        });
}

fn render_trade_history(ui: &mut Ui, fills: &[TradeFill]) {
    if fills.is_empty() {
        empty_placard(ui, &UI_TEXT.orders_empty_trades, &UI_TEXT.orders_empty_trades_hint);
        return;
    }

    let subdued = PLOT_CONFIG.color_text_subdued;

    TableBuilder::new(ui)
        .id_salt("trade_history")
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::remainder())
        .header(16.0, |mut header| {
            for title in [
                UI_TEXT.orders_col_date.as_str(),
                UI_TEXT.orders_col_pair.as_str(),
                UI_TEXT.orders_col_side.as_str(),
                UI_TEXT.orders_col_amount.as_str(),
                UI_TEXT.orders_col_price.as_str(),
                UI_TEXT.orders_col_fee.as_str(),
            ] {
                header.col(|ui| {
                    ui.label(RichText::new(title).small().color(subdued));
                });
            }
        })
        .body(|mut body| {
            for fill in fills {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(
                            RichText::new(epoch_ms_to_date_string(fill.timestamp_ms))
                                .small()
                                .color(subdued),
                        );
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(&fill.symbol).small().strong());
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(fill.side.to_string())
                                .small()
                                .strong()
                                .color(fill.side.color()),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format!("{} {}", fill.amount, fill.base_asset))
                                .monospace()
                                .small(),
                        );
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(format_usd(fill.price)).monospace().small());
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format!("${:.4}", fill.fee))
                                .monospace()
                                .small()
                                .color(subdued),
                        );
                    });
                });
            }
        });
}

fn empty_placard(ui: &mut Ui, title: &str, hint: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        ui.label(RichText::new(title).color(PLOT_CONFIG.color_text_neutral));
        ui.label(RichText::new(hint).small().color(PLOT_CONFIG.color_text_subdued));
        ui.add_space(12.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_tab_is_default() {
        assert_eq!(UserOrdersState::default().tab, UserOrdersTab::Open);
    }

    #[test]
    fn tabs_have_distinct_labels() {
        let labels: Vec<&str> = UserOrdersTab::iter().map(|t| t.label()).collect();
        assert_eq!(labels.len(), 3);
        assert!(labels.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn market_orders_render_without_a_price() {
        let order = Order {
            id: "x".to_string(),
            symbol: "BTCUSDT".to_string(),
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            side: crate::domain::OrderSide::Buy,
            order_type: crate::domain::OrderType::Market,
            amount: 0.5,
            price: 0.0,
            filled: 0.0,
            status: OrderStatus::Open,
            timestamp_ms: 0,
        };
        assert_eq!(price_cell(&order), "Market");
    }
}

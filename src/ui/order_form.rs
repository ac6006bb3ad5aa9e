use std::sync::mpsc::Receiver;
use std::time::Duration;

use eframe::egui::{Button, Checkbox, RichText, TextEdit, Ui};

use crate::config::MARKET;
use crate::config::plot::PLOT_CONFIG;
use crate::domain::{OrderRejected, OrderSide, OrderTicket, OrderType};
use crate::market::{EventKind, MarketDataService, MarketEvent, SubscriptionId};
use crate::ui::styles::{SideColor, UiStyleExt};
use crate::ui::ui_config::UI_TEXT;
use crate::ui::utils::format_usd;
use crate::utils::AppInstant;

const PLACED_FLASH: Duration = Duration::from_secs(2);

/// Order entry panel. All the derived-state arithmetic lives on this struct
/// so it can be exercised without a UI.
pub struct OrderFormState {
    pub order_type: OrderType,
    pub side: OrderSide,
    pub price_text: String,
    pub amount_text: String,
    pub total_text: String,
    pub advanced_open: bool,
    pub post_only: bool,
    pub reduce_only: bool,
    pub error: Option<OrderRejected>,
    placed_at: Option<AppInstant>,
    pair_sub: Option<(SubscriptionId, Receiver<MarketEvent>)>,
    price_sub: Option<(SubscriptionId, Receiver<MarketEvent>)>,
}

impl Default for OrderFormState {
    fn default() -> Self {
        Self {
            order_type: OrderType::Limit,
            side: OrderSide::Buy,
            price_text: String::new(),
            amount_text: String::new(),
            total_text: String::new(),
            advanced_open: false,
            post_only: false,
            reduce_only: false,
            error: None,
            placed_at: None,
            pair_sub: None,
            price_sub: None,
        }
    }
}

fn parse_field(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

impl OrderFormState {
    pub fn connect(&mut self, service: &mut MarketDataService) {
        self.pair_sub = Some(service.subscribe(EventKind::TradingPairChanged));
        self.price_sub = Some(service.subscribe(EventKind::PriceUpdate));
        self.reset_for_pair(service.current_pair().price);
    }

    pub fn pump(&mut self, service: &MarketDataService) {
        let mut new_pair_price = None;
        if let Some((_, rx)) = &self.pair_sub {
            while let Ok(event) = rx.try_recv() {
                if let MarketEvent::TradingPairChanged(pair) = event {
                    new_pair_price = Some(pair.price);
                }
            }
        }
        if let Some(price) = new_pair_price {
            self.reset_for_pair(price);
        }

        // A fresh tick back-fills an empty limit price, never overwrites input.
        let mut latest = None;
        if let Some((_, rx)) = &self.price_sub {
            let symbol = &service.current_pair().symbol;
            while let Ok(event) = rx.try_recv() {
                if let MarketEvent::PriceUpdate(ticks) = event {
                    if let Some(tick) = ticks.iter().find(|t| &t.symbol == symbol) {
                        latest = Some(tick.price);
                    }
                }
            }
        }
        if let Some(price) = latest {
            if self.order_type == OrderType::Limit && self.price_text.trim().is_empty() {
                self.price_text = format!("{:.2}", price);
            }
        }
    }

    /// Switching pairs invalidates every field derived from the old one.
    pub fn reset_for_pair(&mut self, price: f64) {
        self.price_text = format!("{:.2}", price);
        self.amount_text.clear();
        self.total_text.clear();
        self.error = None;
    }

    /// Market orders execute at the live price; limit orders at the field.
    pub fn effective_price(&self, live_price: f64) -> f64 {
        match self.order_type {
            OrderType::Market => live_price,
            OrderType::Limit => parse_field(&self.price_text),
        }
    }

    /// total = price × amount
    pub fn recalc_total(&mut self, live_price: f64) {
        let price = self.effective_price(live_price);
        let amount = parse_field(&self.amount_text);
        self.total_text = format!("{:.2}", price * amount);
    }

    /// amount = total / price (8 dp), only when the price is usable.
    pub fn recalc_amount(&mut self, live_price: f64) {
        let price = self.effective_price(live_price);
        if price > 0.0 {
            let total = parse_field(&self.total_text);
            self.amount_text = format!("{:.8}", total / price);
        }
    }

    /// amount = (balance × pct / 100) / price
    pub fn apply_percentage(&mut self, pct: u32, live_price: f64, balance: f64) {
        let price = self.effective_price(live_price);
        if price > 0.0 {
            let total_to_use = balance * pct as f64 / 100.0;
            self.amount_text = format!("{:.8}", total_to_use / price);
            self.recalc_total(live_price);
        }
    }

    /// Informational flat-fee estimate on the current total.
    pub fn estimated_fee(&self) -> f64 {
        parse_field(&self.total_text) * MARKET.fee_rate
    }

    pub fn ticket(&self, symbol: &str) -> OrderTicket {
        OrderTicket {
            symbol: symbol.to_string(),
            side: self.side,
            order_type: self.order_type,
            amount: parse_field(&self.amount_text),
            price: match self.order_type {
                OrderType::Limit => Some(parse_field(&self.price_text)),
                OrderType::Market => None,
            },
        }
    }

    pub fn switch_order_type(&mut self, order_type: OrderType, live_price: f64) {
        self.order_type = order_type;
        self.recalc_total(live_price);
    }

    fn flash_active(&self) -> bool {
        self.placed_at
            .map(|t| t.elapsed() < PLACED_FLASH)
            .unwrap_or(false)
    }

    fn submit(&mut self, service: &mut MarketDataService) {
        let symbol = service.current_pair().symbol.clone();
        let live_price = service.current_pair().price;

        match service.submit_order(self.ticket(&symbol)) {
            Ok(_) => {
                self.error = None;
                self.placed_at = Some(AppInstant::now());
                self.amount_text.clear();
                self.total_text.clear();
                if self.order_type == OrderType::Limit {
                    self.price_text = format!("{:.2}", live_price);
                }
            }
            Err(rejected) => {
                self.error = Some(rejected);
            }
        }
    }

    pub fn render(&mut self, ui: &mut Ui, service: &mut MarketDataService) {
        let pair = service.current_pair().clone();
        let live_price = pair.price;
        let balance = service.quote_balance();

        ui.horizontal(|ui| {
            ui.strong(UI_TEXT.form_title.as_str());
            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    ui.label(
                        RichText::new(format_usd(balance)).color(PLOT_CONFIG.color_text_neutral),
                    );
                    ui.label_subdued(UI_TEXT.label_balance.clone());
                },
            );
        });

        // Order type tabs
        ui.horizontal(|ui| {
            for order_type in [OrderType::Limit, OrderType::Market] {
                let selected = self.order_type == order_type;
                if ui
                    .selectable_label(selected, order_type.to_string())
                    .clicked()
                {
                    self.switch_order_type(order_type, live_price);
                }
            }
        });

        // Buy/Sell tabs
        ui.horizontal(|ui| {
            for side in [OrderSide::Buy, OrderSide::Sell] {
                let selected = self.side == side;
                let text = RichText::new(format!("{} {}", side, pair.base_asset)).color(
                    if selected {
                        side.color()
                    } else {
                        PLOT_CONFIG.color_text_subdued
                    },
                );
                if ui.selectable_label(selected, text).clicked() {
                    self.side = side;
                }
            }
        });

        ui.add_space(4.0);

        // Price (limit only)
        if self.order_type == OrderType::Limit {
            ui.horizontal(|ui| {
                ui.label_subdued(UI_TEXT.label_price.clone());
                let response = ui.add(
                    TextEdit::singleline(&mut self.price_text)
                        .desired_width(110.0)
                        .hint_text("0.00"),
                );
                if response.changed() {
                    self.recalc_total(live_price);
                }
                ui.label_subdued(pair.quote_asset.clone());
            });
        }

        // Amount
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.label_amount.clone());
            let response = ui.add(
                TextEdit::singleline(&mut self.amount_text)
                    .desired_width(110.0)
                    .hint_text("0.00"),
            );
            if response.changed() {
                self.recalc_total(live_price);
            }
            ui.label_subdued(pair.base_asset.clone());
        });

        // Percentage sizing against the paper balance
        ui.horizontal(|ui| {
            for pct in [25u32, 50, 75, 100] {
                if ui.small_button(format!("{}%", pct)).clicked() {
                    self.apply_percentage(pct, live_price, balance);
                }
            }
        });

        // Total
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.label_total.clone());
            let response = ui.add(
                TextEdit::singleline(&mut self.total_text)
                    .desired_width(110.0)
                    .hint_text("0.00"),
            );
            if response.changed() {
                self.recalc_amount(live_price);
            }
            ui.label_subdued(pair.quote_asset.clone());
        });

        // Advanced options
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.label_advanced.clone());
            let toggle = if self.advanced_open { "Hide" } else { "Show" };
            if ui.small_button(toggle).clicked() {
                self.advanced_open = !self.advanced_open;
            }
        });
        if self.advanced_open {
            ui.add(Checkbox::new(&mut self.post_only, UI_TEXT.label_post_only.clone()));
            ui.add(Checkbox::new(
                &mut self.reduce_only,
                UI_TEXT.label_reduce_only.clone(),
            ));
        }

        if let Some(error) = &self.error {
            ui.label(RichText::new(error.to_string()).color(PLOT_CONFIG.color_sell));
        }

        ui.add_space(4.0);

        // Submit
        let flash = self.flash_active();
        let submit_label = if flash {
            UI_TEXT.order_placed_flash.clone()
        } else {
            format!("{} {}", self.side, pair.base_asset)
        };
        let button = Button::new(RichText::new(submit_label).strong().color(
            eframe::egui::Color32::WHITE,
        ))
        .fill(self.side.color());

        if ui.add_enabled(!flash, button).clicked() {
            self.submit(service);
        }

        // Order summary
        ui.add_space(2.0);
        ui.metric(
            &UI_TEXT.label_available,
            &format_usd(balance),
            PLOT_CONFIG.color_text_neutral,
        );
        ui.metric(
            &UI_TEXT.label_fee,
            &format!("${:.2}", self.estimated_fee()),
            PLOT_CONFIG.color_text_subdued,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> OrderFormState {
        OrderFormState::default()
    }

    #[test]
    fn total_is_price_times_amount() {
        let mut f = form();
        f.price_text = "43000".to_string();
        f.amount_text = "0.5".to_string();

        f.recalc_total(99_999.0); // live price must be ignored for limit orders

        assert_eq!(f.total_text, "21500.00");
    }

    #[test]
    fn market_orders_price_from_live_tick() {
        let mut f = form();
        f.order_type = OrderType::Market;
        f.price_text = "1.0".to_string(); // stale limit field, ignored
        f.amount_text = "2".to_string();

        f.recalc_total(100.0);

        assert_eq!(f.total_text, "200.00");
    }

    #[test]
    fn editing_total_back_computes_amount() {
        let mut f = form();
        f.price_text = "2650.75".to_string();
        f.total_text = "1000".to_string();

        f.recalc_amount(0.0);

        let amount: f64 = f.amount_text.parse().unwrap();
        assert!((amount - 1000.0 / 2650.75).abs() < 1e-8);
    }

    #[test]
    fn zero_price_leaves_amount_untouched() {
        let mut f = form();
        f.price_text = "0".to_string();
        f.amount_text = "1.5".to_string();
        f.total_text = "1000".to_string();

        f.recalc_amount(0.0);

        assert_eq!(f.amount_text, "1.5");
    }

    #[test]
    fn percentage_sizing_uses_balance() {
        let mut f = form();
        f.price_text = "100".to_string();

        f.apply_percentage(25, 0.0, 10_000.0);

        // (10000 * 25%) / 100 = 25 base units
        assert_eq!(f.amount_text, "25.00000000");
        assert_eq!(f.total_text, "2500.00");
    }

    #[test]
    fn fee_is_ten_basis_points_of_total() {
        let mut f = form();
        f.total_text = "2500.00".to_string();
        assert!((f.estimated_fee() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn garbage_input_parses_as_zero() {
        let mut f = form();
        f.price_text = "abc".to_string();
        f.amount_text = "1".to_string();

        f.recalc_total(0.0);

        assert_eq!(f.total_text, "0.00");
    }

    #[test]
    fn ticket_for_market_order_has_no_price() {
        let mut f = form();
        f.order_type = OrderType::Market;
        f.amount_text = "0.5".to_string();

        let ticket = f.ticket("BTCUSDT");

        assert_eq!(ticket.price, None);
        assert_eq!(ticket.amount, 0.5);
    }

    #[test]
    fn reset_for_pair_clears_derived_fields() {
        let mut f = form();
        f.amount_text = "1".to_string();
        f.total_text = "43000".to_string();
        f.error = Some(OrderRejected::InvalidAmount);

        f.reset_for_pair(2650.75);

        assert_eq!(f.price_text, "2650.75");
        assert!(f.amount_text.is_empty());
        assert!(f.total_text.is_empty());
        assert!(f.error.is_none());
    }
}

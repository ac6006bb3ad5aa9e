use std::time::Duration;

use eframe::egui::{CentralPanel, Context, SidePanel, TopBottomPanel, vec2};
use eframe::{Frame, Storage};
use serde::{Deserialize, Serialize};

use crate::Cli;
use crate::domain::ChartInterval;
use crate::market::MarketDataService;
use crate::ui::chart::ChartState;
use crate::ui::header::{HeaderState, NavSection};
use crate::ui::market_trades::MarketTradesState;
use crate::ui::order_book::{BookGrouping, OrderBookState};
use crate::ui::order_form::OrderFormState;
use crate::ui::pair_selector::PairSelectorState;
use crate::ui::ui_config::UI_CONFIG;
use crate::ui::user_orders::{UserOrdersState, UserOrdersTab};
use crate::ui::utils::setup_custom_visuals;
use crate::utils::AppInstant;

/// How long the form area at the bottom of the central panel gets.
const ORDER_FORM_HEIGHT: f32 = 240.0;

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct BTradeApp {
    // Persisted user intent (thin, serializable)
    persisted_symbol: String,
    chart_interval: ChartInterval,
    orders_tab: UserOrdersTab,
    book_grouping: BookGrouping,
    nav_section: NavSection,
    show_user_orders: bool,

    #[serde(skip)]
    pub(crate) service: MarketDataService,
    #[serde(skip)]
    header: HeaderState,
    #[serde(skip)]
    selector: PairSelectorState,
    #[serde(skip)]
    chart: ChartState,
    #[serde(skip)]
    order_form: OrderFormState,
    #[serde(skip)]
    order_book: OrderBookState,
    #[serde(skip)]
    market_trades: MarketTradesState,
    #[serde(skip)]
    user_orders: UserOrdersState,
}

impl Default for BTradeApp {
    fn default() -> Self {
        Self {
            persisted_symbol: "BTCUSDT".to_string(),
            chart_interval: ChartInterval::default(),
            orders_tab: UserOrdersTab::default(),
            book_grouping: BookGrouping::default(),
            nav_section: NavSection::default(),
            show_user_orders: true,
            service: MarketDataService::new(crate::config::MARKET.tick_interval_ms),
            header: HeaderState::default(),
            selector: PairSelectorState::default(),
            chart: ChartState::default(),
            order_form: OrderFormState::default(),
            order_book: OrderBookState::default(),
            market_trades: MarketTradesState::default(),
            user_orders: UserOrdersState::default(),
        }
    }
}

impl BTradeApp {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: BTradeApp = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        // The service itself is never persisted; rebuild it from the CLI.
        app.service = MarketDataService::new(args.tick_ms);
        let symbol = app.persisted_symbol.clone();
        app.service.set_current_pair(&symbol);

        if !args.frozen {
            app.service.start_price_updates();
        }

        // Restore thin persisted intent into the live panel states.
        app.chart.interval = app.chart_interval;
        app.user_orders.tab = app.orders_tab;
        app.order_book.grouping = app.book_grouping;
        app.header.active = app.nav_section;

        // Wire every panel into the service's event hub.
        app.chart.connect(&mut app.service);
        app.order_form.connect(&mut app.service);
        app.order_book.connect(&mut app.service);
        app.market_trades.connect(&mut app.service);
        app.user_orders.connect(&mut app.service);

        app
    }
}

impl eframe::App for BTradeApp {
    fn save(&mut self, storage: &mut dyn Storage) {
        // Persist user intent, not runtime state.
        self.persisted_symbol = self.service.current_pair().symbol.clone();
        self.chart_interval = self.chart.interval;
        self.orders_tab = self.user_orders.tab;
        self.book_grouping = self.order_book.grouping;
        self.nav_section = self.header.active;

        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        // No I-beam cursors or text selection on plain labels.
        ctx.style_mut(|s| s.interaction.selectable_labels = false);

        // Pump the simulated market, then let every panel drain its
        // subscription before anything renders this frame.
        self.service.tick(AppInstant::now());
        self.chart.pump(&mut self.service);
        self.order_form.pump(&self.service);
        self.order_book.pump(&mut self.service);
        self.market_trades.pump(&mut self.service);
        self.user_orders.pump();

        TopBottomPanel::top("header")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| {
                self.header.render(ui, &self.service);
            });

        if self.show_user_orders {
            TopBottomPanel::bottom("user_orders")
                .resizable(true)
                .default_height(190.0)
                .frame(UI_CONFIG.bottom_panel_frame())
                .show(ctx, |ui| {
                    self.user_orders
                        .render(ui, &mut self.service, &mut self.show_user_orders);
                });
        } else {
            TopBottomPanel::bottom("user_orders_collapsed")
                .frame(UI_CONFIG.bottom_panel_frame())
                .show(ctx, |ui| {
                    if ui.small_button("Show Orders").clicked() {
                        self.show_user_orders = true;
                    }
                });
        }

        SidePanel::left("pair_selector")
            .min_width(190.0)
            .resizable(false)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                self.selector.render(ui, &mut self.service);
            });

        SidePanel::right("book_and_trades")
            .min_width(250.0)
            .resizable(false)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                self.order_book.render(ui, &self.service);
                ui.separator();
                self.market_trades.render(ui, &self.service);
            });

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                let chart_height = (ui.available_height() - ORDER_FORM_HEIGHT).max(160.0);
                ui.allocate_ui(vec2(ui.available_width(), chart_height), |ui| {
                    ui.set_min_height(chart_height);
                    self.chart.render(ui, &mut self.service);
                });
                ui.separator();
                self.order_form.render(ui, &mut self.service);
            });

        // The simulated market must keep ticking while the window idles.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_state_round_trips() {
        let mut app = BTradeApp::default();
        app.persisted_symbol = "SOLUSDT".to_string();
        app.chart_interval = ChartInterval::OneHour;
        app.show_user_orders = false;

        let json = serde_json::to_string(&app).unwrap();
        let restored: BTradeApp = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.persisted_symbol, "SOLUSDT");
        assert_eq!(restored.chart_interval, ChartInterval::OneHour);
        assert!(!restored.show_user_orders);
    }

    #[test]
    fn unknown_persisted_symbol_falls_back_to_default_pair() {
        // A pair persisted by an older build may no longer be seeded; the
        // service must shrug it off and keep BTCUSDT.
        let mut app = BTradeApp::default();
        app.service.set_current_pair("DELISTEDUSDT");
        assert_eq!(app.service.current_pair().symbol, "BTCUSDT");
    }
}

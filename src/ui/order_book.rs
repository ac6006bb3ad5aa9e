use std::sync::mpsc::Receiver;

use eframe::egui::{Align2, Color32, FontId, Rect, RichText, Sense, Ui, pos2, vec2};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::plot::PLOT_CONFIG;
use crate::domain::{BookLevel, OrderBook};
use crate::market::{EventKind, MarketDataService, MarketEvent, SubscriptionId};
use crate::ui::styles::{apply_opacity, get_change_color};
use crate::ui::ui_config::UI_TEXT;
use crate::ui::utils::{format_amount, format_pct_change, format_price, format_usd};

const VISIBLE_LEVELS: usize = 10;
const ROW_HEIGHT: f32 = 16.0;

/// Price bucket size for the book display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum BookGrouping {
    Hundredth,
    Tenth,
    #[default]
    One,
}

impl BookGrouping {
    pub fn tick(&self) -> f64 {
        match self {
            BookGrouping::Hundredth => 0.01,
            BookGrouping::Tenth => 0.1,
            BookGrouping::One => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookGrouping::Hundredth => "0.01",
            BookGrouping::Tenth => "0.1",
            BookGrouping::One => "1",
        }
    }
}

/// Order book panel: asks over the live price row over bids, depth bars
/// behind every level.
pub struct OrderBookState {
    pub grouping: BookGrouping,
    book: OrderBook,
    loaded_for: Option<String>,
    price_sub: Option<(SubscriptionId, Receiver<MarketEvent>)>,
}

impl Default for OrderBookState {
    fn default() -> Self {
        Self {
            grouping: BookGrouping::default(),
            book: OrderBook::default(),
            loaded_for: None,
            price_sub: None,
        }
    }
}

impl OrderBookState {
    pub fn connect(&mut self, service: &mut MarketDataService) {
        self.price_sub = Some(service.subscribe(EventKind::PriceUpdate));
    }

    /// The ladder derives from the live mid price, so it is re-pulled on
    /// every tick and whenever the pair changes under us.
    pub fn pump(&mut self, service: &mut MarketDataService) {
        let symbol = service.current_pair().symbol.clone();

        let mut ticked = false;
        if let Some((_, rx)) = &self.price_sub {
            while let Ok(event) = rx.try_recv() {
                if matches!(event, MarketEvent::PriceUpdate(_)) {
                    ticked = true;
                }
            }
        }

        if ticked || self.loaded_for.as_ref() != Some(&symbol) {
            self.book = service.order_book(&symbol);
            self.loaded_for = Some(symbol);
        }
    }

    pub fn render(&mut self, ui: &mut Ui, service: &MarketDataService) {
        let pair = service.current_pair();

        ui.horizontal(|ui| {
            ui.strong(UI_TEXT.book_title.as_str());
            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    for grouping in BookGrouping::iter().collect::<Vec<_>>().into_iter().rev() {
                        let selected = self.grouping == grouping;
                        if ui.selectable_label(selected, grouping.label()).clicked() {
                            self.grouping = grouping;
                        }
                    }
                },
            );
        });

        header_row(ui, &pair.quote_asset, &pair.base_asset);

        let grouped = self.book.grouped(self.grouping.tick());
        let max_amount = grouped.max_amount();

        // Asks nearest the mid first, like the generated ladder.
        for level in grouped.asks.iter().take(VISIBLE_LEVELS) {
            book_row(ui, level, max_amount, PLOT_CONFIG.color_sell);
        }

        // Live price divider
        let change_color = get_change_color(pair.change_24h);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format_usd(pair.price))
                    .strong()
                    .size(14.0)
                    .color(change_color),
            );
            ui.label(RichText::new(format_pct_change(pair.change_24h)).small().color(change_color));
        });

        for level in grouped.bids.iter().take(VISIBLE_LEVELS) {
            book_row(ui, level, max_amount, PLOT_CONFIG.color_buy);
        }
    }
}

fn header_row(ui: &mut Ui, quote: &str, base: &str) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{} ({})", UI_TEXT.book_col_price, quote))
                .small()
                .color(PLOT_CONFIG.color_text_subdued),
        );
        ui.with_layout(
            eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
            |ui| {
                ui.label(
                    RichText::new(UI_TEXT.book_col_total.clone())
                        .small()
                        .color(PLOT_CONFIG.color_text_subdued),
                );
                ui.label(
                    RichText::new(format!("{} ({})", UI_TEXT.book_col_amount, base))
                        .small()
                        .color(PLOT_CONFIG.color_text_subdued),
                );
            },
        );
    });
}

/// One ladder row: a depth bar scaled by amount/max behind
/// price | amount | cumulative columns.
fn book_row(ui: &mut Ui, level: &BookLevel, max_amount: f64, side_color: Color32) {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), ROW_HEIGHT), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter();

    let frac = if max_amount > 0.0 {
        (level.amount / max_amount).min(1.0) as f32
    } else {
        0.0
    };
    painter.rect_filled(
        Rect::from_min_size(rect.min, vec2(rect.width() * frac, rect.height())),
        2.0,
        apply_opacity(side_color, PLOT_CONFIG.depth_bar_opacity),
    );

    let font = FontId::monospace(11.0);
    painter.text(
        rect.left_center(),
        Align2::LEFT_CENTER,
        format_price(level.price),
        font.clone(),
        side_color,
    );
    painter.text(
        pos2(rect.min.x + rect.width() * 0.68, rect.center().y),
        Align2::RIGHT_CENTER,
        format_amount(level.amount),
        font.clone(),
        PLOT_CONFIG.color_text_neutral,
    );
    painter.text(
        rect.right_center(),
        Align2::RIGHT_CENTER,
        format!("{:.4}", level.cumulative),
        font,
        PLOT_CONFIG.color_text_subdued,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_ticks_match_labels() {
        for grouping in BookGrouping::iter() {
            let label: f64 = grouping.label().parse().unwrap();
            assert_eq!(label, grouping.tick());
        }
    }

    #[test]
    fn coarsest_grouping_is_default() {
        assert_eq!(BookGrouping::default(), BookGrouping::One);
    }
}

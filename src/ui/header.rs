use eframe::egui::{Align2, Color32, FontId, RichText, Sense, Ui, vec2};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::plot::PLOT_CONFIG;
use crate::market::MarketDataService;
use crate::ui::styles::{UiStyleExt, get_change_color};
use crate::ui::ui_config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils::{format_pct_change, format_usd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum NavSection {
    #[default]
    Trade,
    Markets,
    Portfolio,
    History,
}

impl NavSection {
    pub fn label(&self) -> &'static str {
        match self {
            NavSection::Trade => "Trade",
            NavSection::Markets => "Markets",
            NavSection::Portfolio => "Portfolio",
            NavSection::History => "History",
        }
    }
}

/// Top navigation bar: brand, live pair readout, section links and the
/// wallet stub.
pub struct HeaderState {
    pub active: NavSection,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            active: NavSection::default(),
        }
    }
}

impl HeaderState {
    pub fn render(&mut self, ui: &mut Ui, service: &MarketDataService) {
        let pair = service.current_pair();

        ui.horizontal(|ui| {
            brand_badge(ui);
            ui.heading(RichText::new(UI_TEXT.brand.clone()).strong());

            ui.separator();

            ui.label(
                RichText::new(pair.display_name())
                    .strong()
                    .color(PLOT_CONFIG.color_text_neutral),
            );
            ui.label(
                RichText::new(format_usd(pair.price))
                    .strong()
                    .size(18.0)
                    .color(PLOT_CONFIG.color_text_neutral),
            );
            // 24h change chip
            ui.label(
                RichText::new(format_pct_change(pair.change_24h))
                    .small()
                    .color(Color32::WHITE)
                    .background_color(get_change_color(pair.change_24h)),
            );

            ui.separator();

            for section in NavSection::iter() {
                let selected = self.active == section;
                if ui
                    .interactive_label(
                        section.label(),
                        selected,
                        PLOT_CONFIG.color_text_subdued,
                        FontId::proportional(13.0),
                    )
                    .clicked()
                {
                    self.active = section;
                }
            }

            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    if ui
                        .button(RichText::new(UI_TEXT.connect_wallet.clone()).strong())
                        .clicked()
                    {
                        // Visual stub only, there is no wallet to connect.
                        log::info!("Connect Wallet clicked");
                    }
                },
            );
        });
    }
}

/// Amber square with the brand initial.
fn brand_badge(ui: &mut Ui) {
    let size = 22.0;
    let (rect, _) = ui.allocate_exact_size(vec2(size, size), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, UI_CONFIG.colors.accent);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "B",
        FontId::proportional(15.0),
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_section_is_default() {
        assert_eq!(HeaderState::default().active, NavSection::Trade);
    }
}

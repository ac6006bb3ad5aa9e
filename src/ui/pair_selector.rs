use eframe::egui::{Align2, FontId, Rect, RichText, ScrollArea, Sense, TextEdit, Ui, vec2};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::plot::PLOT_CONFIG;
use crate::domain::TradingPair;
use crate::market::MarketDataService;
use crate::ui::styles::get_change_color;
use crate::ui::ui_config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils::{format_pct_change, format_usd, format_volume};

const ROW_HEIGHT: f32 = 36.0;

/// Quote-asset tab above the pair list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Default)]
pub enum QuoteFilter {
    #[default]
    All,
    Btc,
    Eth,
    Usdt,
}

impl QuoteFilter {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteFilter::All => "All",
            QuoteFilter::Btc => "BTC",
            QuoteFilter::Eth => "ETH",
            QuoteFilter::Usdt => "USDT",
        }
    }

    pub fn matches(&self, pair: &TradingPair) -> bool {
        match self {
            QuoteFilter::All => true,
            _ => pair.quote_asset.eq_ignore_ascii_case(self.label()),
        }
    }
}

/// Search + category filter, then the matching pairs sorted by 24h volume.
pub fn filter_pairs<'a>(
    pairs: &'a [TradingPair],
    search: &str,
    category: QuoteFilter,
) -> Vec<&'a TradingPair> {
    let needle = search.trim().to_lowercase();

    let mut matches: Vec<&TradingPair> = pairs
        .iter()
        .filter(|pair| {
            let matches_search = needle.is_empty()
                || pair.symbol.to_lowercase().contains(&needle)
                || pair.base_asset.to_lowercase().contains(&needle)
                || pair.quote_asset.to_lowercase().contains(&needle);
            matches_search && category.matches(pair)
        })
        .collect();

    matches.sort_by(|a, b| b.volume_24h.total_cmp(&a.volume_24h));
    matches
}

/// Left-hand trading pair selector panel.
pub struct PairSelectorState {
    pub search: String,
    pub category: QuoteFilter,
}

impl Default for PairSelectorState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: QuoteFilter::default(),
        }
    }
}

impl PairSelectorState {
    pub fn render(&mut self, ui: &mut Ui, service: &mut MarketDataService) {
        ui.add(
            TextEdit::singleline(&mut self.search)
                .desired_width(f32::INFINITY)
                .hint_text(UI_TEXT.search_hint.clone()),
        );

        ui.horizontal(|ui| {
            for category in QuoteFilter::iter() {
                let selected = self.category == category;
                if ui.selectable_label(selected, category.label()).clicked() {
                    self.category = category;
                }
            }
        });
        ui.separator();

        let pairs = service.trading_pairs().to_vec();
        let current_symbol = service.current_pair().symbol.clone();
        let filtered = filter_pairs(&pairs, &self.search, self.category);

        if filtered.is_empty() {
            ui.label(
                RichText::new(UI_TEXT.no_pairs_found.clone())
                    .small()
                    .color(PLOT_CONFIG.color_text_subdued),
            );
            return;
        }

        let mut clicked_symbol = None;

        ScrollArea::vertical()
            .id_salt("pair_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for pair in filtered {
                    if pair_row(ui, pair, pair.symbol == current_symbol) {
                        clicked_symbol = Some(pair.symbol.clone());
                    }
                }
            });

        if let Some(symbol) = clicked_symbol {
            service.set_current_pair(&symbol);
        }
    }
}

/// Two-line row: name + volume on the left, price + change on the right.
/// Painted manually so the whole row is one click target.
fn pair_row(ui: &mut Ui, pair: &TradingPair, is_active: bool) -> bool {
    let (rect, response) =
        ui.allocate_exact_size(vec2(ui.available_width(), ROW_HEIGHT), Sense::click());
    if !ui.is_rect_visible(rect) {
        return response.clicked();
    }

    let painter = ui.painter();

    if is_active || response.hovered() {
        let fill = if is_active {
            ui.style().visuals.selection.bg_fill
        } else {
            ui.style().visuals.widgets.hovered.bg_fill
        };
        painter.rect_filled(rect, 4.0, fill);
    }
    if is_active {
        // Accent stripe on the left edge, like an active nav entry.
        painter.rect_filled(
            Rect::from_min_size(rect.min, vec2(3.0, rect.height())),
            0.0,
            UI_CONFIG.colors.accent,
        );
    }

    let inner = rect.shrink2(vec2(8.0, 4.0));
    let name_font = FontId::proportional(12.0);
    let small_font = FontId::proportional(10.0);

    painter.text(
        inner.left_top(),
        Align2::LEFT_TOP,
        pair.display_name(),
        name_font.clone(),
        PLOT_CONFIG.color_text_neutral,
    );
    painter.text(
        inner.left_bottom(),
        Align2::LEFT_BOTTOM,
        format!("{} {}", UI_TEXT.volume_prefix, format_volume(pair.volume_24h)),
        small_font.clone(),
        PLOT_CONFIG.color_text_subdued,
    );
    painter.text(
        inner.right_top(),
        Align2::RIGHT_TOP,
        format_usd(pair.price),
        name_font,
        PLOT_CONFIG.color_text_neutral,
    );
    painter.text(
        inner.right_bottom(),
        Align2::RIGHT_BOTTOM,
        format_pct_change(pair.change_24h),
        small_font,
        get_change_color(pair.change_24h),
    );

    response.clicked()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MARKET;

    fn pairs() -> Vec<TradingPair> {
        MARKET.seed_pairs.iter().map(TradingPair::from).collect()
    }

    #[test]
    fn no_filter_returns_all_sorted_by_volume() {
        let pairs = pairs();
        let filtered = filter_pairs(&pairs, "", QuoteFilter::All);

        assert_eq!(filtered.len(), 5);
        assert!(filtered.windows(2).all(|w| w[0].volume_24h >= w[1].volume_24h));
        assert_eq!(filtered[0].symbol, "ADAUSDT"); // largest seeded volume
    }

    #[test]
    fn search_matches_base_asset_case_insensitive() {
        let pairs = pairs();
        let filtered = filter_pairs(&pairs, "sol", QuoteFilter::All);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].symbol, "SOLUSDT");
    }

    #[test]
    fn search_matches_quote_asset() {
        let pairs = pairs();
        let filtered = filter_pairs(&pairs, "usdt", QuoteFilter::All);
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn unmatched_search_is_empty() {
        let pairs = pairs();
        assert!(filter_pairs(&pairs, "doge", QuoteFilter::All).is_empty());
    }

    #[test]
    fn category_filters_by_quote() {
        let pairs = pairs();
        assert_eq!(filter_pairs(&pairs, "", QuoteFilter::Usdt).len(), 5);
        assert!(filter_pairs(&pairs, "", QuoteFilter::Btc).is_empty());
    }

    #[test]
    fn search_and_category_combine() {
        let pairs = pairs();
        let filtered = filter_pairs(&pairs, "eth", QuoteFilter::Usdt);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].symbol, "ETHUSDT");
    }
}

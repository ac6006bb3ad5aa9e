use std::sync::mpsc::Receiver;

use eframe::egui::{RichText, Ui, Vec2b};
use egui_plot::Plot;
use strum::IntoEnumIterator;

use crate::config::{DF, MARKET};
use crate::config::plot::PLOT_CONFIG;
use crate::domain::{Candle, ChartInterval};
use crate::market::{EventKind, MarketDataService, MarketEvent, SubscriptionId};
use crate::ui::plot_layers::{CandlestickLayer, LayerContext, PlotLayer, PriceLineLayer};
use crate::ui::styles::{UiStyleExt, get_change_color};
use crate::ui::ui_config::UI_TEXT;
use crate::ui::utils::{format_pct_change, format_price, format_usd, format_volume};
use crate::utils::TimeUtils;

/// Candlestick chart panel: interval switcher, live stats strip and the plot.
pub struct ChartState {
    pub interval: ChartInterval,
    candles: Vec<Candle>,
    loaded_for: Option<(String, ChartInterval)>,
    price_sub: Option<(SubscriptionId, Receiver<MarketEvent>)>,
}

impl Default for ChartState {
    fn default() -> Self {
        Self {
            interval: ChartInterval::default(),
            candles: Vec::new(),
            loaded_for: None,
            price_sub: None,
        }
    }
}

impl ChartState {
    pub fn connect(&mut self, service: &mut MarketDataService) {
        self.price_sub = Some(service.subscribe(EventKind::PriceUpdate));
    }

    /// Reload the series when pair or interval changed, then fold queued
    /// price ticks into the forming candle.
    pub fn pump(&mut self, service: &mut MarketDataService) {
        let symbol = service.current_pair().symbol.clone();
        let key = (symbol.clone(), self.interval);

        if self.loaded_for.as_ref() != Some(&key) {
            self.candles =
                service.candlestick_data(&symbol, self.interval, MARKET.candles_default_limit);
            self.loaded_for = Some(key);
            if DF.log_candle_reloads {
                log::info!("Chart reloaded: {} {}", symbol, self.interval);
            }
        }

        let mut latest_price = None;
        if let Some((_, rx)) = &self.price_sub {
            while let Ok(event) = rx.try_recv() {
                if let MarketEvent::PriceUpdate(ticks) = event {
                    if let Some(tick) = ticks.iter().find(|t| t.symbol == symbol) {
                        latest_price = Some(tick.price);
                    }
                }
            }
        }
        if let Some(price) = latest_price {
            self.fold_tick(price, TimeUtils::now_timestamp_ms());
        }
    }

    /// Live update: ticks inside the last candle's window reshape it, ticks
    /// past the window open a fresh candle seeded at the print.
    fn fold_tick(&mut self, price: f64, now_ms: i64) {
        let interval_ms = self.interval.interval_ms();

        let Some(last) = self.candles.last_mut() else {
            return;
        };

        if now_ms < last.timestamp_ms + interval_ms {
            last.apply_price(price);
        } else {
            let open_time = last.timestamp_ms + interval_ms;
            self.candles
                .push(Candle::new(open_time, price, price, price, price, 0.0));
            if self.candles.len() > MARKET.candles_default_limit {
                self.candles.remove(0);
            }
        }
    }

    pub fn render(&mut self, ui: &mut Ui, service: &mut MarketDataService) {
        self.render_header(ui, service);
        ui.add_space(4.0);
        self.render_plot(ui, service);
    }

    fn render_header(&mut self, ui: &mut Ui, service: &MarketDataService) {
        let pair = service.current_pair().clone();

        ui.horizontal(|ui| {
            ui.heading(RichText::new(pair.display_name()).strong());

            let change_color = get_change_color(pair.change_24h);
            ui.label(
                RichText::new(format_usd(pair.price))
                    .monospace()
                    .size(16.0)
                    .color(change_color),
            );
            ui.label(RichText::new(format_pct_change(pair.change_24h)).color(change_color));

            ui.separator();

            // 24h stats strip, derived from the loaded series
            let high = self.candles.iter().map(|c| c.high).fold(f64::MIN, f64::max);
            let low = self.candles.iter().map(|c| c.low).fold(f64::MAX, f64::min);
            let volume: f64 = self.candles.iter().map(|c| c.volume).sum();

            if !self.candles.is_empty() {
                ui.metric(&UI_TEXT.stat_high_24h, &format_usd(high), PLOT_CONFIG.color_text_neutral);
                ui.metric(&UI_TEXT.stat_low_24h, &format_usd(low), PLOT_CONFIG.color_text_neutral);
                ui.metric(
                    &UI_TEXT.stat_volume_24h,
                    &format_volume(volume),
                    PLOT_CONFIG.color_text_neutral,
                );
            }

            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    // Rightmost first in this layout, so iterate reversed
                    for candidate in ChartInterval::iter().collect::<Vec<_>>().into_iter().rev() {
                        let selected = self.interval == candidate;
                        if ui.selectable_label(selected, candidate.label()).clicked() {
                            self.interval = candidate;
                        }
                    }
                },
            );
        });
    }

    fn render_plot(&self, ui: &mut Ui, service: &MarketDataService) {
        let current_price = service.current_pair().price;

        let (mut y_min, mut y_max) = self
            .candles
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), c| {
                (lo.min(c.low), hi.max(c.high))
            });
        y_min = y_min.min(current_price);
        y_max = y_max.max(current_price);

        let padding = (y_max - y_min) * PLOT_CONFIG.plot_y_padding_pct;
        let x_max = self.candles.len() as f64;

        Plot::new("price_chart")
            .height((ui.available_height() - 20.0).max(120.0))
            .label_formatter(|_, _| String::new())
            .show_axes(Vec2b { x: false, y: true })
            .allow_double_click_reset(false)
            .allow_scroll(false)
            .allow_drag(Vec2b { x: true, y: false })
            .allow_zoom(Vec2b { x: true, y: false })
            .show(ui, |plot_ui| {
                if self.candles.is_empty() {
                    return;
                }

                plot_ui.set_plot_bounds_x(-1.0..=x_max);
                plot_ui.set_plot_bounds_y((y_min - padding)..=(y_max + padding));

                let ctx = LayerContext {
                    candles: &self.candles,
                    current_price: Some(current_price),
                };

                let layers: [&dyn PlotLayer; 2] = [&CandlestickLayer, &PriceLineLayer];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });

        // Keep a caption under the plot so the timeframe is never ambiguous.
        ui.label(
            RichText::new(format!(
                "{} · {} candles · last {}",
                self.interval,
                self.candles.len(),
                self.candles
                    .last()
                    .map(|c| format_price(c.close))
                    .unwrap_or_else(|| "--".to_string())
            ))
            .small()
            .color(PLOT_CONFIG.color_text_subdued),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with_candles() -> ChartState {
        let mut chart = ChartState::default();
        chart.interval = ChartInterval::OneMinute;
        chart.candles = vec![
            Candle::new(0, 10.0, 11.0, 9.0, 10.5, 1.0),
            Candle::new(60_000, 10.5, 10.8, 10.2, 10.4, 1.0),
        ];
        chart
    }

    #[test]
    fn tick_inside_window_reshapes_last_candle() {
        let mut chart = chart_with_candles();

        chart.fold_tick(10.9, 90_000); // inside the second candle's minute

        let last = chart.candles.last().unwrap();
        assert_eq!(chart.candles.len(), 2);
        assert_eq!(last.close, 10.9);
        assert_eq!(last.high, 10.9);
    }

    #[test]
    fn tick_past_window_opens_new_candle() {
        let mut chart = chart_with_candles();

        chart.fold_tick(10.6, 121_000); // past the second candle's minute

        assert_eq!(chart.candles.len(), 3);
        let last = chart.candles.last().unwrap();
        assert_eq!(last.timestamp_ms, 120_000);
        assert_eq!(last.open, 10.6);
        assert_eq!(last.close, 10.6);
    }

    #[test]
    fn series_stays_capped() {
        let mut chart = ChartState::default();
        chart.interval = ChartInterval::OneMinute;
        chart.candles = (0..MARKET.candles_default_limit as i64)
            .map(|i| Candle::new(i * 60_000, 10.0, 10.0, 10.0, 10.0, 0.0))
            .collect();

        let horizon = MARKET.candles_default_limit as i64 * 60_000;
        chart.fold_tick(11.0, horizon + 1);

        assert_eq!(chart.candles.len(), MARKET.candles_default_limit);
        assert_eq!(chart.candles.last().unwrap().close, 11.0);
    }
}

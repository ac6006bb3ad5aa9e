use eframe::egui::Color32;
use egui_plot::{HLine, Line, PlotPoints, PlotUi, Polygon};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::{Candle, CandleType};

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub candles: &'a [Candle],
    pub current_price: Option<f64>,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. CANDLESTICK LAYER
// ============================================================================
pub struct CandlestickLayer;

impl PlotLayer for CandlestickLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for (i, candle) in ctx.candles.iter().enumerate() {
            draw_candle(plot_ui, i as f64, candle);
        }
    }
}

fn draw_candle(ui: &mut PlotUi, x: f64, candle: &Candle) {
    let color = match candle.get_type() {
        CandleType::Bullish => PLOT_CONFIG.candle_bullish_color,
        CandleType::Bearish => PLOT_CONFIG.candle_bearish_color,
    };

    // 1. Wick
    if candle.high > candle.low {
        draw_wick_line(ui, x, candle.high, candle.low, color);
    }

    // 2. Body
    let body_top_raw = candle.open.max(candle.close);
    let body_bot = candle.open.min(candle.close);
    // Doji check: give a flat body a sliver of height so it stays visible
    let body_top = if (body_top_raw - body_bot).abs() < f64::EPSILON {
        body_bot * 1.0001
    } else {
        body_top_raw
    };

    draw_body_rect(ui, x, body_top, body_bot, color);
}

#[inline]
fn draw_wick_line(ui: &mut PlotUi, x: f64, top: f64, bottom: f64, color: Color32) {
    ui.line(
        Line::new("", PlotPoints::new(vec![[x, bottom], [x, top]]))
            .color(color)
            .width(PLOT_CONFIG.candle_wick_width),
    );
}

#[inline]
fn draw_body_rect(ui: &mut PlotUi, x: f64, top: f64, bottom: f64, color: Color32) {
    let half_w = PLOT_CONFIG.candle_width_pct / 2.0;
    let pts = vec![
        [x - half_w, bottom],
        [x + half_w, bottom],
        [x + half_w, top],
        [x - half_w, top],
    ];

    // No stroke: a border smears thin candles into a blur
    ui.polygon(
        Polygon::new("", PlotPoints::new(pts))
            .fill_color(color)
            .stroke(eframe::egui::Stroke::NONE),
    );
}

// ============================================================================
// 2. PRICE LINE LAYER
// ============================================================================
pub struct PriceLineLayer;

impl PlotLayer for PriceLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some(price) = ctx.current_price {
            plot_ui.hline(
                HLine::new("Current Price", price)
                    .color(PLOT_CONFIG.current_price_color)
                    .width(PLOT_CONFIG.current_price_line_width)
                    .style(egui_plot::LineStyle::dashed_loose()),
            );
        }
    }
}

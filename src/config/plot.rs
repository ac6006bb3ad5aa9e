//! Plot and panel color configuration.

use eframe::egui::Color32;

pub struct PlotConfig {
    // --- CANDLESTICKS ---
    pub candle_bullish_color: Color32,
    pub candle_bearish_color: Color32,
    pub candle_width_pct: f64,  // 0.0 to 1.0 (relative to time step)
    pub candle_wick_width: f32, // Pixels

    // PRICE LINE
    pub current_price_color: Color32,
    pub current_price_line_width: f32,

    pub plot_y_padding_pct: f64, // Y-Axis padding factor (0.05 = 5% top and bottom)

    // --- SEMANTIC COLORS ---
    pub color_buy: Color32,
    pub color_sell: Color32,
    pub color_up: Color32,
    pub color_down: Color32,

    pub color_info: Color32,
    pub color_warning: Color32,

    pub color_text_neutral: Color32, // Main values (white)
    pub color_text_subdued: Color32, // Explanations/context (gray)

    // ORDER BOOK DEPTH BARS
    pub depth_bar_opacity: f32,

    // UI WIDGET STYLES
    pub color_widget_background: Color32,
    pub color_widget_border: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    candle_bullish_color: Color32::from_rgb(14, 203, 129), // Binance green
    candle_bearish_color: Color32::from_rgb(246, 70, 93),  // Binance red
    candle_width_pct: 0.7,
    candle_wick_width: 1.5,

    current_price_color: Color32::from_rgb(255, 215, 0), // Gold
    current_price_line_width: 1.0,

    plot_y_padding_pct: 0.05,

    color_buy: Color32::from_rgb(14, 203, 129),
    color_sell: Color32::from_rgb(246, 70, 93),
    color_up: Color32::from_rgb(14, 203, 129),
    color_down: Color32::from_rgb(246, 70, 93),

    color_info: Color32::from_rgb(100, 200, 255),
    color_warning: Color32::from_rgb(240, 185, 11), // Amber accent

    color_text_neutral: Color32::WHITE,
    color_text_subdued: Color32::GRAY,

    depth_bar_opacity: 0.12,

    color_widget_background: Color32::from_rgb(24, 26, 32),
    color_widget_border: Color32::from_rgb(47, 51, 61),
};

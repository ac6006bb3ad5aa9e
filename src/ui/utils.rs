use eframe::egui::{Context, Visuals};

use crate::ui::ui_config::UI_CONFIG;

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    // Make the widgets stand out a bit more
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

fn group_thousands(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a price with "Trader Precision".
/// - Large (>=1000): 2 decimals with thousands separators ($95,123.50)
/// - Medium (1-1000): 2 decimals ($12.48)
/// - Small (<1): 6 decimals ($0.452100)
pub fn format_price(price: f64) -> String {
    let abs_price = price.abs();

    if abs_price >= 1000.0 {
        let formatted = format!("{:.2}", abs_price);
        let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
        let sign = if price < 0.0 { "-" } else { "" };
        format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
    } else if abs_price >= 1.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.6}", price)
    }
}

pub fn format_usd(price: f64) -> String {
    format!("${}", format_price(price))
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.6}", amount)
}

/// Compact 24h volume: 12.5M, 891.2K, 44.81
pub fn format_volume(volume: f64) -> String {
    if !volume.is_finite() {
        return "0.00".to_string();
    }
    if volume >= 1_000_000.0 {
        format!("{:.1}M", volume / 1_000_000.0)
    } else if volume >= 1000.0 {
        format!("{:.1}K", volume / 1000.0)
    } else {
        format!("{:.2}", volume)
    }
}

/// Signed percent string: "+2.45%" / "-1.23%"
pub fn format_pct_change(change: f64) -> String {
    format!("{}{:.2}%", if change >= 0.0 { "+" } else { "" }, change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_uses_thousands_separators() {
        assert_eq!(format_price(43250.5), "43,250.50");
        assert_eq!(format_price(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn price_precision_scales_with_magnitude() {
        assert_eq!(format_price(98.45), "98.45");
        assert_eq!(format_price(0.4521), "0.452100");
    }

    #[test]
    fn negative_prices_keep_their_sign() {
        assert_eq!(format_price(-43250.5), "-43,250.50");
    }

    #[test]
    fn volume_is_compacted() {
        assert_eq!(format_volume(25_731_400.0), "25.7M");
        assert_eq!(format_volume(44_812.0), "44.8K");
        assert_eq!(format_volume(12.3), "12.30");
        assert_eq!(format_volume(f64::NAN), "0.00");
    }

    #[test]
    fn pct_change_is_signed() {
        assert_eq!(format_pct_change(2.45), "+2.45%");
        assert_eq!(format_pct_change(-1.23), "-1.23%");
        assert_eq!(format_pct_change(0.0), "+0.00%");
    }
}

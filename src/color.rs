use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::filter::ChartSeries;

// ---------------------------------------------------------------------------
// Bar colours
// ---------------------------------------------------------------------------

/// `n` distinct colours on evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = i as f32 * 360.0 / n as f32;
            let rgb: Srgb = Hsl::new(hue, 0.65, 0.5).into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

/// One colour per bar, in series order. Regions keep their colour across
/// years only when the region list is the same, which is the normal case for
/// this kind of table.
pub fn bar_colors(series: &ChartSeries) -> Vec<Color32> {
    generate_palette(series.len())
}

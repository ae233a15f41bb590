use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::bar_colors;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Regional bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render population per region for the selected year. Bars sit at x = 0, 1,
/// 2, … and the axis formatter maps those positions back to region names.
pub fn region_chart(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;
    if chart.is_empty() {
        ui.label("No regional rows for this year.");
        return;
    }

    let colors = bar_colors(chart);
    let bars: Vec<Bar> = chart
        .points
        .iter()
        .zip(colors)
        .enumerate()
        .filter_map(|(i, (point, color))| {
            let value = point.value?;
            Some(Bar::new(i as f64, value).name(&point.region).fill(color))
        })
        .collect();

    let labels: Vec<String> = chart.points.iter().map(|p| p.region.clone()).collect();

    ui.label(format!("Sum of regions: {:.0}", chart.total()));

    Plot::new("region_chart")
        .height(ui.available_height() * 0.5)
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
                return String::new();
            }
            labels.get(pos as usize).cloned().unwrap_or_default()
        })
        .y_axis_label(state.settings.value_column.clone())
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));
        });
}

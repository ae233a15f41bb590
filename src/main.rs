mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use app::LaborDashboardApp;
use config::Settings;
use eframe::egui;

const EXTRA_FONT: &str = "extra_font";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = Settings::from_env().context("loading settings")?;
    log::info!("Starting with {settings:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Labor Force Dashboard",
        options,
        Box::new(|cc| {
            if let Some(font) = &settings.font_path {
                // A missing font only degrades glyph coverage.
                if let Err(e) = install_font(&cc.egui_ctx, font) {
                    log::warn!("Font not installed: {e:#}");
                }
            }
            Ok(Box::new(LaborDashboardApp::new(settings)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}

/// Append a font file as the last fallback of both families, so glyphs the
/// built-in fonts lack (Hangul) still render.
fn install_font(ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        EXTRA_FONT.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(EXTRA_FONT.to_owned());
    }
    ctx.set_fonts(fonts);
    log::info!("Installed font {}", path.display());
    Ok(())
}

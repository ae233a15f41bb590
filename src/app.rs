use eframe::egui::{self, Ui};

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{chart, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaborDashboardApp {
    pub state: AppState,
}

impl LaborDashboardApp {
    /// Build the app and open the configured data file, if there is one.
    pub fn new(settings: Settings) -> Self {
        let mut state = AppState::new(settings);
        state.open_configured();
        Self { state }
    }
}

impl eframe::App for LaborDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart and tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Economically active population by year and region");

    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to view data  (File → Open…)");
        });
        return;
    };
    if dataset.table.is_empty() {
        ui.label(format!("{} has no data rows.", dataset.path.display()));
        return;
    }
    let Some(year) = &state.selected_year else {
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.add_space(6.0);
            ui.heading(format!("{year}: population by region (thousands)"));
            chart::region_chart(ui, state);

            ui.separator();
            ui.heading(format!("{year}: detailed data"));
            table::data_table(ui, "year_table", &dataset.table, &state.visible_rows);

            if state.show_all {
                ui.separator();
                ui.heading("Full source data");
                let all_rows: Vec<usize> = (0..dataset.table.len()).collect();
                table::data_table(ui, "full_table", &dataset.table, &all_rows);
            }
        });
}

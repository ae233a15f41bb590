use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year selector and toggle
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data filter");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closure.
    let years = dataset.years.clone();
    let year_column = state.settings.year_column.clone();

    ui.strong(format!("Select {year_column}"));
    let current = state
        .selected_year
        .as_ref()
        .map(|y| y.to_string())
        .unwrap_or_default();
    let mut picked = None;
    egui::ComboBox::from_id_salt("year_select")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for year in &years {
                let is_selected = state.selected_year.as_ref() == Some(year);
                if ui.selectable_label(is_selected, year.to_string()).clicked() {
                    picked = Some(year.clone());
                }
            }
        });
    if let Some(year) = picked {
        state.select_year(year);
    }

    ui.add_space(8.0);
    let mut show_all = state.show_all;
    if ui.checkbox(&mut show_all, "Show full source data").changed() {
        state.set_show_all(show_all);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let loaded = state.dataset.is_some();
            if ui.add_enabled(loaded, egui::Button::new("Reload")).clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(loaded, egui::Button::new("Export view as CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let cached = state.cache.len();
            if ui
                .add_enabled(!state.cache.is_empty(), egui::Button::new(format!("Clear cache ({cached})")))
                .clicked()
            {
                state.clear_cache();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} rows, {} in view",
                ds.path.display(),
                ds.table.len(),
                state.visible_rows.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open labor-force data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let year = state
        .selected_year
        .as_ref()
        .map(|y| y.to_string())
        .unwrap_or_default();
    let file = rfd::FileDialog::new()
        .set_title("Export current view")
        .set_file_name(format!("view_{year}.csv"))
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };
    match state.export_view(&path) {
        Ok(n) => {
            log::info!("Exported {n} rows to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export view: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

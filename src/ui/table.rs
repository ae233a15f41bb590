use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;

const ROW_HEIGHT: f32 = 18.0;

/// Render `rows` (indices into `table`) with every column of the table.
/// `id` keeps two tables on one page apart.
pub fn data_table(ui: &mut Ui, id: &str, table: &Table, rows: &[usize]) {
    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(320.0)
                .columns(Column::auto().at_least(60.0), table.headers.len())
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for name in &table.headers {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let record = &table.rows[rows[row.index()]];
                        for text in &record.raw {
                            row.col(|ui: &mut Ui| {
                                ui.label(text.as_str());
                            });
                        }
                    });
                });
        });
    });
}

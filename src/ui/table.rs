use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;
use crate::view::PresentationRequest;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 280.0;

/// Draw a table verbatim. Non-finite numbers show as blank cells.
pub fn data_table(ui: &mut Ui, id: &str, table: &Table) {
    if table.is_empty() {
        ui.label("No rows.");
        return;
    }
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .columns(Column::auto().at_least(60.0), table.columns().len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in table.columns() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let cells = &table.rows()[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}

/// Labelled scalar readouts, one per line.
pub fn readout(ui: &mut Ui, lines: &[(String, String)]) {
    for (label, value) in lines {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("{label}:"));
            ui.strong(value);
        });
    }
}

/// Draw any presentation request under its heading.
pub fn presentation(ui: &mut Ui, request: &PresentationRequest) {
    ui.heading(request.title());
    match request {
        PresentationRequest::Table { title, table } => data_table(ui, title, table),
        PresentationRequest::Chart(spec) => super::plot::chart(ui, spec),
        PresentationRequest::Readout { lines, .. } => readout(ui, lines),
        PresentationRequest::NoData { reason, .. } => {
            ui.label(RichText::new(format!("No data available ({reason})")).color(Color32::GRAY));
        }
    }
    ui.add_space(12.0);
}

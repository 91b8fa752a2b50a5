use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MedalBoardApp {
    pub state: AppState,
}

impl MedalBoardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MedalBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation + selections ----
        egui::SidePanel::left("options_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the current section's views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Olympics 2024 Interactive Medal, Competition, and Historical Analysis");
            ui.separator();
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    for request in &self.state.rendered {
                        table::presentation(ui, request);
                    }
                });
        });
    }
}

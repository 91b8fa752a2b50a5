mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use app::MedalBoardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(DashboardConfig::FILE_NAME))?;

    // Tables are loaded once, before the window opens; a bad schema aborts here.
    let tables = match data::loader::load_tables(&config) {
        Ok(tables) => Arc::new(tables),
        Err(e) => {
            log::error!("Failed to load dashboard data: {e:#}");
            return Err(e);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let state = AppState::new(config, tables);
    eframe::run_native(
        "Olympics 2024 – Medal Board",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the jpg/png logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(MedalBoardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the dashboard window")
}

use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Table, Value};
use crate::data::schema::{competitions, historical, medals};
use crate::state::AppState;
use crate::view::{MedalKind, Section};

// ---------------------------------------------------------------------------
// Left side panel – section navigation and selection controls
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(logo) = &state.config.logo {
        if logo.exists() {
            let uri = format!("file://{}", logo.display());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add(
                    egui::Image::new(uri)
                        .max_width(ui.available_width() * 0.8)
                        .max_height(120.0),
                );
            });
            ui.add_space(4.0);
        }
    }

    ui.heading("Options");
    ui.separator();

    let mut section = state.section;
    for s in Section::ALL {
        ui.radio_value(&mut section, s, s.label());
    }
    state.set_section(section);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.section {
            Section::Medals => medal_controls(ui, state),
            Section::Competitions => competition_controls(ui, state),
            Section::Historical => historical_controls(ui, state),
            Section::Insights => {
                ui.label("Headline facts drawn from the loaded tables.");
            }
        });
}

/// Single-choice picker over `domain`. Returns the new choice if the user
/// picked a different value.
fn pick_one(ui: &mut Ui, label: &str, current: &Option<Value>, domain: &[Value]) -> Option<Value> {
    let mut picked = None;
    ui.strong(label);
    let shown = current.as_ref().map(|v| v.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt(label)
        .selected_text(shown)
        .width(ui.available_width() - 8.0)
        .show_ui(ui, |ui: &mut Ui| {
            for val in domain {
                let selected = current.as_ref() == Some(val);
                if ui.selectable_label(selected, val.to_string()).clicked() && !selected {
                    picked = Some(val.clone());
                }
            }
        });
    ui.add_space(6.0);
    picked
}

fn domain(table: &Table, column: &str) -> Vec<Value> {
    table.distinct_values(column).unwrap_or_default()
}

fn medal_controls(ui: &mut Ui, state: &mut AppState) {
    let teams = domain(&state.tables.medals, medals::TEAM);

    // ---- Multi-select for the comparison chart ----
    let n_selected = state.selections.compare_teams.len();
    let header = format!("Select Countries to Compare  ({n_selected}/{})", teams.len());
    let mut toggled: Option<Value> = None;
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("compare_teams")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    let all = teams.clone();
                    state.update_selections(|sel| sel.compare_teams = all);
                }
                if ui.small_button("None").clicked() {
                    state.update_selections(|sel| sel.compare_teams.clear());
                }
            });
            for team in &teams {
                let mut checked = state.selections.compare_teams.contains(team);
                if ui.checkbox(&mut checked, team.to_string()).changed() {
                    toggled = Some(team.clone());
                }
            }
        });
    if let Some(team) = toggled {
        state.toggle_compare_team(&team);
    }
    ui.add_space(6.0);

    if let Some(team) = pick_one(
        ui,
        "Select a Country for Detailed Analysis",
        &state.selections.detail_team,
        &teams,
    ) {
        state.update_selections(|sel| sel.detail_team = Some(team));
    }

    ui.strong("Select Medal Type for Analysis");
    let mut kind = state.selections.medal_kind;
    ui.horizontal(|ui: &mut Ui| {
        for k in MedalKind::ALL {
            ui.radio_value(&mut kind, k, k.medal_column());
        }
    });
    state.update_selections(|sel| sel.medal_kind = kind);
}

fn competition_controls(ui: &mut Ui, state: &mut AppState) {
    let comps = domain(&state.tables.competitions, competitions::COMPETITION);
    if let Some(c) = pick_one(ui, "Select Competition", &state.selections.competition, &comps) {
        state.update_selections(|sel| sel.competition = Some(c));
    }

    let nocs = domain(&state.tables.competitions, competitions::NOC);
    if let Some(c) = pick_one(
        ui,
        "Select Country",
        &state.selections.competition_country,
        &nocs,
    ) {
        state.update_selections(|sel| sel.competition_country = Some(c));
    }
}

fn historical_controls(ui: &mut Ui, state: &mut AppState) {
    let countries = domain(&state.tables.historical, historical::COUNTRY);
    if let Some(c) = pick_one(
        ui,
        "Select Country for Historical Trend",
        &state.selections.trend_country,
        &countries,
    ) {
        state.update_selections(|sel| sel.trend_country = Some(c));
    }

    let comps = domain(&state.tables.historical, historical::COMPETITION);
    if let Some(c) = pick_one(
        ui,
        "Select Competition for Trend",
        &state.selections.trend_competition,
        &comps,
    ) {
        state.update_selections(|sel| sel.trend_competition = Some(c));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let t = &state.tables;
        ui.label(format!(
            "{} teams, {} competition results, {} historical records",
            t.medals.len(),
            t.competitions.len(),
            t.historical.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

/// Re-load the three tables from a user-chosen folder. On failure the
/// current snapshot stays in place and the error is shown in the top bar.
pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open Olympics data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        match crate::data::loader::load_tables_from(&dir, &state.config) {
            Ok(tables) => state.set_tables(Arc::new(tables)),
            Err(e) => {
                log::error!("Failed to load tables from {}: {e:#}", dir.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

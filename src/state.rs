use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::model::{Tables, Value};
use crate::view::{self, PresentationRequest, Section, Selections};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Read-only snapshot of the three input tables.
    pub tables: Arc<Tables>,

    /// Section chosen in the side panel.
    pub section: Section,

    /// Current value of every selection control.
    pub selections: Selections,

    /// Presentation requests of the current section (cached until the
    /// section or a selection changes).
    pub rendered: Vec<PresentationRequest>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, tables: Arc<Tables>) -> Self {
        let selections = Selections::initial(&tables);
        let mut state = Self {
            config,
            tables,
            section: Section::default(),
            selections,
            rendered: Vec::new(),
            status_message: None,
        };
        state.rerender();
        state
    }

    /// Swap in a newly loaded snapshot and reset the selections to it.
    pub fn set_tables(&mut self, tables: Arc<Tables>) {
        self.selections = Selections::initial(&tables);
        self.tables = tables;
        self.status_message = None;
        self.rerender();
    }

    /// Re-evaluate every view of the current section.
    pub fn rerender(&mut self) {
        log::debug!("Rendering section {:?}", self.section);
        self.rendered = self
            .section
            .views()
            .iter()
            .map(|&v| view::render(v, &self.selections, &self.tables))
            .collect();
    }

    pub fn set_section(&mut self, section: Section) {
        if self.section != section {
            self.section = section;
            self.rerender();
        }
    }

    /// Apply `edit` to the selections and re-render if anything changed.
    pub fn update_selections(&mut self, edit: impl FnOnce(&mut Selections)) {
        let before = self.selections.clone();
        edit(&mut self.selections);
        if self.selections != before {
            self.rerender();
        }
    }

    /// Toggle a team in the comparison multi-select, keeping the order of
    /// the medal table.
    pub fn toggle_compare_team(&mut self, team: &Value) {
        let order = self
            .tables
            .medals
            .distinct_values(crate::data::schema::medals::TEAM)
            .unwrap_or_default();
        self.update_selections(|sel| {
            if let Some(pos) = sel.compare_teams.iter().position(|t| t == team) {
                sel.compare_teams.remove(pos);
            } else {
                sel.compare_teams.push(team.clone());
                sel.compare_teams
                    .sort_by_key(|t| order.iter().position(|o| o == t).unwrap_or(usize::MAX));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::view::ViewId;

    fn state() -> AppState {
        AppState::new(DashboardConfig::default(), Arc::new(fixtures::tables()))
    }

    #[test]
    fn starts_on_medal_section() {
        let s = state();
        assert_eq!(s.section, Section::Medals);
        assert_eq!(s.rendered.len(), Section::Medals.views().len());
    }

    #[test]
    fn switching_section_rerenders() {
        let mut s = state();
        s.set_section(Section::Insights);
        assert_eq!(s.rendered.len(), 1);
        assert_eq!(s.rendered[0].title(), view::title(ViewId::Insights, &s.selections));
    }

    #[test]
    fn toggling_teams_keeps_table_order() {
        let mut s = state();
        s.toggle_compare_team(&Value::from("USA"));
        assert_eq!(s.selections.compare_teams, vec![Value::from("CHN")]);

        s.toggle_compare_team(&Value::from("USA"));
        s.toggle_compare_team(&Value::from("AUS"));
        assert_eq!(
            s.selections.compare_teams,
            vec![Value::from("USA"), Value::from("CHN"), Value::from("AUS")]
        );
    }

    #[test]
    fn selection_change_updates_titles() {
        let mut s = state();
        s.update_selections(|sel| sel.detail_team = Some("JPN".into()));
        assert!(s
            .rendered
            .iter()
            .any(|r| r.title() == "Medal Distribution for JPN"));
    }
}

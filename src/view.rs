//! Views: pure functions from (selections, tables) to a presentation request.
//!
//! ```text
//!   Selections ──┐
//!                ├─▶ render(view) ─▶ PresentationRequest ─▶ ui::{plot, table}
//!   Tables ──────┘        │
//!                         └─ data::pipeline (filter / sort / aggregate)
//! ```
//!
//! Nothing in here touches egui; the UI layer only draws what it is handed.

use palette::Srgb;

use crate::color;
use crate::data::error::DataError;
use crate::data::model::{Table, Tables, Value};
use crate::data::pipeline;
use crate::data::schema::{competitions, historical, medals};

/// Number of teams in the "top countries by medal type" chart.
pub const TOP_COUNTRIES: usize = 10;
/// Leaderboard length within a single competition.
pub const LEADERBOARD_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Sections and views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Medals,
    Competitions,
    Historical,
    Insights,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Medals,
        Section::Competitions,
        Section::Historical,
        Section::Insights,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Medals => "Medal Analysis",
            Section::Competitions => "Competitions Analysis",
            Section::Historical => "Historical Trends",
            Section::Insights => "Additional Information",
        }
    }

    /// Views shown in this section, top to bottom.
    pub fn views(self) -> &'static [ViewId] {
        use ViewId::*;
        match self {
            Section::Medals => &[
                MedalTable,
                MedalProportions,
                CountryComparison,
                MedalCorrelation,
                CountryBreakdown,
                TopByMedal,
                MedalTotals,
                TopWinners,
            ],
            Section::Competitions => &[
                CompetitionTable,
                CompetitionDistribution,
                CompetitionLeaders,
                CountryAcrossCompetitions,
            ],
            Section::Historical => &[
                CountryTrend,
                CountryMedalRecords,
                CompetitionTrend,
                AllCountryRecords,
            ],
            Section::Insights => &[Insights],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    MedalTable,
    MedalProportions,
    CountryComparison,
    MedalCorrelation,
    CountryBreakdown,
    TopByMedal,
    MedalTotals,
    TopWinners,
    CompetitionTable,
    CompetitionDistribution,
    CompetitionLeaders,
    CountryAcrossCompetitions,
    CountryTrend,
    CountryMedalRecords,
    CompetitionTrend,
    AllCountryRecords,
    Insights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MedalKind {
    #[default]
    Gold,
    Silver,
    Bronze,
}

impl MedalKind {
    pub const ALL: [MedalKind; 3] = [MedalKind::Gold, MedalKind::Silver, MedalKind::Bronze];

    pub fn label(self) -> &'static str {
        match self {
            MedalKind::Gold => "Gold",
            MedalKind::Silver => "Silver",
            MedalKind::Bronze => "Bronze",
        }
    }

    /// Column of this medal in the medal table.
    pub fn medal_column(self) -> &'static str {
        match self {
            MedalKind::Gold => medals::GOLD,
            MedalKind::Silver => medals::SILVER,
            MedalKind::Bronze => medals::BRONZE,
        }
    }

    pub fn color(self) -> Srgb<u8> {
        match self {
            MedalKind::Gold => color::GOLD,
            MedalKind::Silver => color::SILVER,
            MedalKind::Bronze => color::BRONZE,
        }
    }
}

const MEDAL_COLORS: [Srgb<u8>; 3] = [color::GOLD, color::SILVER, color::BRONZE];

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

/// Current value of every selection control.
///
/// A selection that no longer exists in a table (e.g. after opening a
/// different data folder) is not an error; the affected view renders empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selections {
    pub compare_teams: Vec<Value>,
    pub detail_team: Option<Value>,
    pub medal_kind: MedalKind,
    pub competition: Option<Value>,
    pub competition_country: Option<Value>,
    pub trend_country: Option<Value>,
    pub trend_competition: Option<Value>,
}

impl Selections {
    /// Defaults: first value of each control's domain, first two teams for
    /// the comparison.
    pub fn initial(tables: &Tables) -> Self {
        let first = |t: &Table, col: &str| {
            t.distinct_values(col)
                .ok()
                .and_then(|v| v.into_iter().next())
        };
        let teams = tables.medals.distinct_values(medals::TEAM).unwrap_or_default();

        Selections {
            compare_teams: teams.iter().take(2).cloned().collect(),
            detail_team: teams.into_iter().next(),
            medal_kind: MedalKind::Gold,
            competition: first(&tables.competitions, competitions::COMPETITION),
            competition_country: first(&tables.competitions, competitions::NOC),
            trend_country: first(&tables.historical, historical::COUNTRY),
            trend_competition: first(&tables.historical, historical::COMPETITION),
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Heatmap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacking {
    None,
    Stacked,
    Grouped,
}

/// Everything the presentation layer needs to draw one chart.
///
/// For `Pie`, `x_field` holds slice labels and `y_fields[0]` their sizes.
/// For `Heatmap`, `x_field` holds row labels and `y_fields` the matrix columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_field: String,
    pub y_fields: Vec<String>,
    /// One colour per entry of `y_fields` (or per slice for pies).
    pub colors: Vec<Srgb<u8>>,
    pub stacking: Stacking,
    pub y_label: Option<String>,
    pub data: Table,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresentationRequest {
    /// Show a table verbatim.
    Table { title: String, table: Table },
    Chart(ChartSpec),
    /// Labelled scalar readouts.
    Readout {
        title: String,
        lines: Vec<(String, String)>,
    },
    /// The view has nothing to show for the current selection.
    NoData { title: String, reason: String },
}

impl PresentationRequest {
    pub fn title(&self) -> &str {
        match self {
            PresentationRequest::Table { title, .. }
            | PresentationRequest::Readout { title, .. }
            | PresentationRequest::NoData { title, .. } => title,
            PresentationRequest::Chart(spec) => &spec.title,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Produce the presentation request for `view`.
///
/// Never fails: an empty selection result or an aggregate over no rows
/// becomes [`PresentationRequest::NoData`].
pub fn render(view: ViewId, selections: &Selections, tables: &Tables) -> PresentationRequest {
    render_view(view, selections, tables).unwrap_or_else(|err| {
        log::debug!("{view:?}: {err}");
        PresentationRequest::NoData {
            title: title(view, selections),
            reason: err.to_string(),
        }
    })
}

/// Title of a view given the current selections.
pub fn title(view: ViewId, sel: &Selections) -> String {
    let name = |v: &Option<Value>| v.as_ref().map(|v| v.to_string()).unwrap_or_default();
    match view {
        ViewId::MedalTable => "Olympics Medal Table".into(),
        ViewId::MedalProportions => "Medal Proportions for Each Country".into(),
        ViewId::CountryComparison => "Comparison of Selected Countries".into(),
        ViewId::MedalCorrelation => "Correlation Matrix of Medals".into(),
        ViewId::CountryBreakdown => format!("Medal Distribution for {}", name(&sel.detail_team)),
        ViewId::TopByMedal => format!(
            "Top {TOP_COUNTRIES} Countries by {} Medals",
            sel.medal_kind.medal_column()
        ),
        ViewId::MedalTotals => "Total Medals Overview".into(),
        ViewId::TopWinners => "Top Countries by Medal Type".into(),
        ViewId::CompetitionTable => "Olympics Competitions Dataset".into(),
        ViewId::CompetitionDistribution => {
            format!("Medal Distribution in {}", name(&sel.competition))
        }
        ViewId::CompetitionLeaders => format!(
            "Top {LEADERBOARD_SIZE} Countries in {}",
            name(&sel.competition)
        ),
        ViewId::CountryAcrossCompetitions => format!(
            "{}'s Performance Across Competitions",
            name(&sel.competition_country)
        ),
        ViewId::CountryTrend => {
            format!("Medal Wins for {} Over Time", name(&sel.trend_country))
        }
        ViewId::CountryMedalRecords => format!(
            "Athletes from {} with Most Medals",
            name(&sel.trend_country)
        ),
        ViewId::CompetitionTrend => format!(
            "Medal Wins in {} Over Time",
            name(&sel.trend_competition)
        ),
        ViewId::AllCountryRecords => "All Countries Medal Information".into(),
        ViewId::Insights => "Interesting Facts and Statistics".into(),
    }
}

/// Filter on one optional selection; `None` selects nothing.
fn select_one(table: &Table, column: &str, value: &Option<Value>) -> Result<Table, DataError> {
    let keys: Vec<Value> = value.iter().cloned().collect();
    pipeline::filter_by_keys(table, column, &keys)
}

/// An empty filter result is reported as "no data" rather than drawn empty.
fn non_empty(table: Table, column: &str) -> Result<Table, DataError> {
    if table.is_empty() {
        Err(DataError::EmptyTable {
            column: column.to_string(),
        })
    } else {
        Ok(table)
    }
}

fn chart(
    kind: ChartKind,
    title: String,
    x_field: &str,
    y_fields: &[&str],
    colors: &[Srgb<u8>],
    stacking: Stacking,
    data: Table,
) -> PresentationRequest {
    PresentationRequest::Chart(ChartSpec {
        kind,
        title,
        x_field: x_field.to_string(),
        y_fields: y_fields.iter().map(|f| f.to_string()).collect(),
        colors: colors.to_vec(),
        stacking,
        y_label: None,
        data,
    })
}

fn render_view(
    view: ViewId,
    sel: &Selections,
    tables: &Tables,
) -> Result<PresentationRequest, DataError> {
    let title = title(view, sel);
    let medal_counts = [medals::GOLD, medals::SILVER, medals::BRONZE];
    let comp_counts = [competitions::GOLD, competitions::SILVER, competitions::BRONZE];

    let request = match view {
        // ---- Medal analysis ----
        ViewId::MedalTable => PresentationRequest::Table {
            title,
            table: tables.medals.clone(),
        },
        ViewId::MedalProportions => {
            let data = pipeline::percentage_columns(&tables.medals, medals::TOTAL, &medals::SHARES)?;
            let mut request = chart(
                ChartKind::Bar,
                title,
                medals::TEAM,
                &[medals::GOLD_PCT, medals::SILVER_PCT, medals::BRONZE_PCT],
                &MEDAL_COLORS,
                Stacking::Stacked,
                data,
            );
            if let PresentationRequest::Chart(spec) = &mut request {
                spec.y_label = Some("Percentage".into());
            }
            request
        }
        ViewId::CountryComparison => {
            let data = pipeline::filter_by_keys(&tables.medals, medals::TEAM, &sel.compare_teams)?;
            let data = non_empty(data, medals::TEAM)?;
            chart(
                ChartKind::Bar,
                title,
                medals::TEAM,
                &medal_counts,
                &MEDAL_COLORS,
                Stacking::Grouped,
                data,
            )
        }
        ViewId::MedalCorrelation => {
            let matrix = pipeline::correlation_matrix(&tables.medals, &medal_counts)?;
            chart(
                ChartKind::Heatmap,
                title,
                "Medal",
                &medal_counts,
                &[],
                Stacking::None,
                matrix.to_table("Medal"),
            )
        }
        ViewId::CountryBreakdown => {
            let team = select_one(&tables.medals, medals::TEAM, &sel.detail_team)?;
            let team = non_empty(team, medals::TEAM)?;
            let rows = MedalKind::ALL
                .iter()
                .map(|kind| {
                    let count = team
                        .value(0, kind.medal_column())
                        .cloned()
                        .unwrap_or(Value::Null);
                    vec![Value::from(kind.label()), count]
                })
                .collect();
            chart(
                ChartKind::Pie,
                title,
                "Medal",
                &["Count"],
                &MEDAL_COLORS,
                Stacking::None,
                Table::new(vec!["Medal".into(), "Count".into()], rows),
            )
        }
        ViewId::TopByMedal => {
            let kind = sel.medal_kind;
            let data = pipeline::top_n(&tables.medals, kind.medal_column(), TOP_COUNTRIES, true)?;
            chart(
                ChartKind::Bar,
                title,
                medals::TEAM,
                &[kind.medal_column()],
                &[kind.color()],
                Stacking::None,
                data,
            )
        }
        ViewId::MedalTotals => {
            let sums = pipeline::column_sums(
                &tables.medals,
                &[medals::GOLD, medals::SILVER, medals::BRONZE, medals::TOTAL],
            )?;
            PresentationRequest::Readout {
                title,
                lines: sums
                    .into_iter()
                    .map(|(col, sum)| (col, sum.to_string()))
                    .collect(),
            }
        }
        ViewId::TopWinners => {
            let lines = MedalKind::ALL
                .iter()
                .map(|kind| -> Result<(String, String), DataError> {
                    let team =
                        pipeline::argmax_lookup(&tables.medals, kind.medal_column(), medals::TEAM)?;
                    Ok((format!("Top {} Medal Winner", kind.label()), team.to_string()))
                })
                .collect::<Result<Vec<_>, DataError>>()?;
            PresentationRequest::Readout { title, lines }
        }

        // ---- Competitions analysis ----
        ViewId::CompetitionTable => PresentationRequest::Table {
            title,
            table: tables.competitions.clone(),
        },
        ViewId::CompetitionDistribution => {
            let data = select_one(
                &tables.competitions,
                competitions::COMPETITION,
                &sel.competition,
            )?;
            chart(
                ChartKind::Bar,
                title,
                competitions::NOC,
                &comp_counts,
                &MEDAL_COLORS,
                Stacking::Stacked,
                non_empty(data, competitions::COMPETITION)?,
            )
        }
        ViewId::CompetitionLeaders => {
            let group = sel
                .competition
                .as_ref()
                .ok_or_else(|| DataError::EmptyTable {
                    column: competitions::COMPETITION.into(),
                })?;
            let top = pipeline::group_and_sort(
                &tables.competitions,
                competitions::COMPETITION,
                group,
                competitions::TOTAL,
                LEADERBOARD_SIZE,
            )?;
            let top = non_empty(top, competitions::COMPETITION)?;
            PresentationRequest::Table {
                title,
                table: pipeline::select_columns(
                    &top,
                    &[
                        competitions::RANK,
                        competitions::NOC,
                        competitions::GOLD,
                        competitions::SILVER,
                        competitions::BRONZE,
                        competitions::TOTAL,
                    ],
                )?,
            }
        }
        ViewId::CountryAcrossCompetitions => {
            let data = select_one(
                &tables.competitions,
                competitions::NOC,
                &sel.competition_country,
            )?;
            chart(
                ChartKind::Bar,
                title,
                competitions::COMPETITION,
                &comp_counts,
                &MEDAL_COLORS,
                Stacking::Grouped,
                non_empty(data, competitions::NOC)?,
            )
        }

        // ---- Historical trends ----
        ViewId::CountryTrend => {
            let data = select_one(&tables.historical, historical::COUNTRY, &sel.trend_country)?;
            let data = pipeline::sort_rows(&non_empty(data, historical::COUNTRY)?, historical::YEAR, false)?;
            chart(
                ChartKind::Line,
                title,
                historical::YEAR,
                &[historical::TOTAL],
                &[color::GOLD],
                Stacking::None,
                data,
            )
        }
        ViewId::CountryMedalRecords => {
            let data = select_one(&tables.historical, historical::COUNTRY, &sel.trend_country)?;
            let data = non_empty(data, historical::COUNTRY)?;
            PresentationRequest::Table {
                title,
                table: pipeline::distinct_rows(
                    &data,
                    &[historical::GOLD, historical::SILVER, historical::BRONZE],
                )?,
            }
        }
        ViewId::CompetitionTrend => {
            let data = select_one(
                &tables.historical,
                historical::COMPETITION,
                &sel.trend_competition,
            )?;
            let data = pipeline::sort_rows(
                &non_empty(data, historical::COMPETITION)?,
                historical::YEAR,
                false,
            )?;
            chart(
                ChartKind::Line,
                title,
                historical::YEAR,
                &[historical::TOTAL],
                &[color::SILVER],
                Stacking::None,
                data,
            )
        }
        ViewId::AllCountryRecords => PresentationRequest::Table {
            title,
            table: pipeline::distinct_rows(
                &tables.historical,
                &[
                    historical::COUNTRY,
                    historical::YEAR,
                    historical::GOLD,
                    historical::SILVER,
                    historical::BRONZE,
                ],
            )?,
        },

        // ---- Additional information ----
        ViewId::Insights => {
            let team = pipeline::argmax_lookup(&tables.medals, medals::TOTAL, medals::TEAM)?;
            let competition = pipeline::argmax_lookup(
                &tables.competitions,
                competitions::TOTAL,
                competitions::COMPETITION,
            )?;
            PresentationRequest::Readout {
                title,
                lines: vec![
                    ("Country with the Most Total Medals".into(), team.to_string()),
                    (
                        "Competition with the Highest Medal Count".into(),
                        competition.to_string(),
                    ),
                ],
            }
        }
    };
    Ok(request)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn chart_of(request: PresentationRequest) -> ChartSpec {
        match request {
            PresentationRequest::Chart(spec) => spec,
            other => panic!("expected a chart, got {other:?}"),
        }
    }

    fn column_text(table: &Table, column: &str) -> Vec<String> {
        let idx = table.column_index(column).unwrap();
        table.rows().iter().map(|r| r[idx].to_string()).collect()
    }

    #[test]
    fn initial_selections_use_first_values() {
        let sel = Selections::initial(&fixtures::tables());
        assert_eq!(sel.compare_teams, vec![Value::from("USA"), Value::from("CHN")]);
        assert_eq!(sel.detail_team, Some(Value::from("USA")));
        assert_eq!(sel.competition, Some(Value::from("Swimming")));
        assert_eq!(sel.competition_country, Some(Value::from("AUS")));
        assert_eq!(sel.trend_country, Some(Value::from("United States")));
        assert_eq!(sel.trend_competition, Some(Value::from("Swimming")));
    }

    #[test]
    fn every_view_renders_with_initial_selections() {
        let tables = fixtures::tables();
        let sel = Selections::initial(&tables);
        for section in Section::ALL {
            for &view in section.views() {
                let request = render(view, &sel, &tables);
                assert!(
                    !matches!(request, PresentationRequest::NoData { .. }),
                    "{view:?} rendered no data"
                );
                assert!(!request.title().is_empty());
            }
        }
    }

    #[test]
    fn proportions_are_a_stacked_percentage_bar() {
        let tables = fixtures::tables();
        let spec = chart_of(render(
            ViewId::MedalProportions,
            &Selections::initial(&tables),
            &tables,
        ));
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.stacking, Stacking::Stacked);
        assert_eq!(spec.y_fields, vec!["Gold %", "Silver %", "Bronze %"]);
        assert_eq!(spec.colors, MEDAL_COLORS.to_vec());
        assert!(spec.data.has_column(medals::GOLD_PCT));
    }

    #[test]
    fn comparison_with_no_teams_is_no_data() {
        let tables = fixtures::tables();
        let sel = Selections {
            compare_teams: vec![],
            ..Selections::initial(&tables)
        };
        assert!(matches!(
            render(ViewId::CountryComparison, &sel, &tables),
            PresentationRequest::NoData { .. }
        ));
    }

    #[test]
    fn top_by_medal_follows_selected_kind() {
        let tables = fixtures::tables();
        let sel = Selections {
            medal_kind: MedalKind::Silver,
            ..Selections::initial(&tables)
        };
        let spec = chart_of(render(ViewId::TopByMedal, &sel, &tables));
        assert_eq!(spec.title, "Top 10 Countries by SILVER Medals");
        assert_eq!(spec.colors, vec![color::SILVER]);
        assert_eq!(
            column_text(&spec.data, medals::TEAM),
            vec!["USA", "CHN", "AUS", "JPN"]
        );
    }

    #[test]
    fn breakdown_pie_has_one_slice_per_medal() {
        let tables = fixtures::tables();
        let sel = Selections {
            detail_team: Some("JPN".into()),
            ..Selections::initial(&tables)
        };
        let spec = chart_of(render(ViewId::CountryBreakdown, &sel, &tables));
        assert_eq!(spec.kind, ChartKind::Pie);
        assert_eq!(column_text(&spec.data, "Count"), vec!["20", "12", "13"]);
    }

    #[test]
    fn leaders_are_top_three_by_total() {
        let tables = fixtures::tables();
        let request = render(
            ViewId::CompetitionLeaders,
            &Selections::initial(&tables),
            &tables,
        );
        let PresentationRequest::Table { table, .. } = request else {
            panic!("expected a table");
        };
        assert_eq!(table.columns()[0], competitions::RANK);
        assert_eq!(column_text(&table, competitions::NOC), vec!["USA", "AUS", "CHN"]);
    }

    #[test]
    fn out_of_domain_competition_is_no_data() {
        let tables = fixtures::tables();
        let sel = Selections {
            competition: Some("Breaking".into()),
            trend_competition: Some("Breaking".into()),
            ..Selections::initial(&tables)
        };
        for view in [
            ViewId::CompetitionDistribution,
            ViewId::CompetitionLeaders,
            ViewId::CompetitionTrend,
        ] {
            assert!(matches!(
                render(view, &sel, &tables),
                PresentationRequest::NoData { .. }
            ));
        }
    }

    #[test]
    fn country_trend_is_sorted_by_year() {
        let tables = fixtures::tables();
        let spec = chart_of(render(
            ViewId::CountryTrend,
            &Selections::initial(&tables),
            &tables,
        ));
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(
            column_text(&spec.data, historical::YEAR),
            vec!["2012", "2016", "2020", "2020"]
        );
    }

    #[test]
    fn country_records_are_deduplicated() {
        let tables = fixtures::tables();
        let request = render(
            ViewId::CountryMedalRecords,
            &Selections::initial(&tables),
            &tables,
        );
        let PresentationRequest::Table { table, .. } = request else {
            panic!("expected a table");
        };
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn insights_name_the_leaders() {
        let tables = fixtures::tables();
        let request = render(ViewId::Insights, &Selections::initial(&tables), &tables);
        let PresentationRequest::Readout { lines, .. } = request else {
            panic!("expected a readout");
        };
        assert_eq!(lines[0].1, "USA");
        assert_eq!(lines[1].1, "Athletics");
    }

    #[test]
    fn top_winners_on_empty_table_is_no_data() {
        let tables = fixtures::tables();
        let empty = pipeline::filter_by_keys(&tables.medals, medals::TEAM, &[]).unwrap();
        let tables = Tables::new(empty, tables.competitions, tables.historical).unwrap();
        let request = render(ViewId::TopWinners, &Selections::default(), &tables);
        let PresentationRequest::NoData { reason, .. } = request else {
            panic!("expected no data");
        };
        assert!(reason.contains("no data available"));
    }
}

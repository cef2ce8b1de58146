use std::collections::VecDeque;

use crate::data::{parse_match_date, DataStore, Innings, MatchRecord, Result};
use crate::match_analysis::{
    batting_performance_series, boundary_totals, bowling_performance_series,
    dismissal_distribution, fielder_catch_matrix, kpis, BatsmanPerf, BoundaryTotals, BowlerPerf,
    CatchMatrix, Kpis,
};
use crate::series_analysis::{
    pair_dominance, toss_choice_by_venue, venue_match_count_and_peak_runs, wins_by_team,
    PairDominance, TeamWins, VenueStats, VenueTossChoices,
};
use crate::team_performance::{
    matches_by_city, overseas_roster, squad_distribution, toss_choice_breakdown, toss_win_rate,
    won_vs_played_by_city, CityRecord, CityScore, OverseasPlayer, RoleGroup, TossChoiceSplit,
    TossRecord,
};

const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Series,
    Team,
    Match,
}

pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Series => "SERIES",
        Screen::Team => "TEAM",
        Screen::Match => "MATCH",
    }
}

#[derive(Debug, Clone)]
pub struct SeriesView {
    pub wins: Vec<TeamWins>,
    pub venues: Vec<VenueStats>,
    pub pairs: Vec<PairDominance>,
    pub toss_by_venue: Vec<VenueTossChoices>,
}

#[derive(Debug, Clone)]
pub struct TeamView {
    pub team: String,
    pub distribution: Vec<RoleGroup>,
    pub cities: Vec<CityScore>,
    pub overseas: Vec<OverseasPlayer>,
    pub record_by_city: Vec<CityRecord>,
    pub toss_record: TossRecord,
    pub toss_choices: TossChoiceSplit,
}

#[derive(Debug, Clone)]
pub struct InningsView {
    pub team: String,
    pub kpis: Kpis,
    pub dismissals: Vec<(String, u32)>,
    pub boundaries: BoundaryTotals,
    pub batting: Vec<BatsmanPerf>,
    pub bowling: Vec<BowlerPerf>,
    pub catches: CatchMatrix,
}

#[derive(Debug, Clone)]
pub struct MatchView {
    pub label: String,
    pub first: InningsView,
    pub second: InningsView,
}

/// One row of the match selector: "date, name" in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchChoice {
    pub match_id: u32,
    pub label: String,
}

pub struct AppState {
    pub store: DataStore,
    pub screen: Screen,
    pub teams: Vec<String>,
    pub team_selected: usize,
    pub match_choices: Vec<MatchChoice>,
    pub match_selected: usize,
    pub series_view: Option<SeriesView>,
    pub series_error: Option<String>,
    pub team_view: Option<TeamView>,
    pub team_error: Option<String>,
    pub match_view: Option<MatchView>,
    pub match_error: Option<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(store: DataStore) -> Self {
        Self {
            store,
            screen: Screen::Series,
            teams: Vec::new(),
            team_selected: 0,
            match_choices: Vec::new(),
            match_selected: 0,
            series_view: None,
            series_error: None,
            team_view: None,
            team_error: None,
            match_view: None,
            match_error: None,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            help_overlay: false,
        }
    }

    /// Populate selectors and the initial tab. Selector failures are logged;
    /// the per-tab error is what aborts rendering.
    pub fn init(&mut self) {
        self.refresh_selectors();
        self.recompute_active_view();
    }

    pub fn refresh_selectors(&mut self) {
        match self.store.load_match_info() {
            Ok(info) => {
                // Distinct Team1 values in first-seen order, selector form.
                let mut teams: Vec<String> = Vec::new();
                for row in &info {
                    let selector = row.team1.replace(' ', "_");
                    if !teams.contains(&selector) {
                        teams.push(selector);
                    }
                }
                self.teams = teams;
                self.team_selected = 0;
            }
            Err(err) => {
                self.push_log(format!("[WARN] team selector load failed: {err}"));
            }
        }

        match self.store.load_match_listing() {
            Ok(listing) => {
                let mut choices: Vec<(Option<chrono::NaiveDate>, MatchChoice)> = listing
                    .iter()
                    .map(|row| {
                        let label = format!("{}, {}", row.match_date, row.match_name);
                        (
                            parse_match_date(&row.match_date),
                            MatchChoice {
                                match_id: row.match_id,
                                label,
                            },
                        )
                    })
                    .collect();
                choices.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.label.cmp(&b.1.label)));
                self.match_choices = choices.into_iter().map(|(_, choice)| choice).collect();
                self.match_selected = 0;
            }
            Err(err) => {
                self.push_log(format!("[WARN] match selector load failed: {err}"));
            }
        }
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.recompute_active_view();
        }
    }

    pub fn selected_team(&self) -> Option<&str> {
        self.teams.get(self.team_selected).map(String::as_str)
    }

    pub fn selected_match(&self) -> Option<&MatchChoice> {
        self.match_choices.get(self.match_selected)
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Series => {}
            Screen::Team => {
                if !self.teams.is_empty() {
                    self.team_selected = (self.team_selected + 1) % self.teams.len();
                    self.recompute_team_view();
                }
            }
            Screen::Match => {
                if !self.match_choices.is_empty() {
                    self.match_selected = (self.match_selected + 1) % self.match_choices.len();
                    self.recompute_match_view();
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Series => {}
            Screen::Team => {
                if !self.teams.is_empty() {
                    self.team_selected =
                        (self.team_selected + self.teams.len() - 1) % self.teams.len();
                    self.recompute_team_view();
                }
            }
            Screen::Match => {
                if !self.match_choices.is_empty() {
                    self.match_selected = (self.match_selected + self.match_choices.len() - 1)
                        % self.match_choices.len();
                    self.recompute_match_view();
                }
            }
        }
    }

    /// Re-read the source files for the active tab. Any loader or aggregator
    /// error aborts the view for that tab; nothing renders partially.
    pub fn recompute_active_view(&mut self) {
        match self.screen {
            Screen::Series => self.recompute_series_view(),
            Screen::Team => self.recompute_team_view(),
            Screen::Match => self.recompute_match_view(),
        }
    }

    pub fn recompute_series_view(&mut self) {
        match self.store.load_merged_matches() {
            Ok(records) => {
                self.series_view = Some(build_series_view(&records));
                self.series_error = None;
            }
            Err(err) => {
                self.series_view = None;
                self.series_error = Some(err.to_string());
                self.push_log(format!("[WARN] series view aborted: {err}"));
            }
        }
    }

    pub fn recompute_team_view(&mut self) {
        let Some(team) = self.selected_team().map(str::to_string) else {
            self.team_view = None;
            self.team_error = Some("no team selected".to_string());
            return;
        };
        match build_team_view(&self.store, &team) {
            Ok(view) => {
                self.team_view = Some(view);
                self.team_error = None;
            }
            Err(err) => {
                self.team_view = None;
                self.team_error = Some(err.to_string());
                self.push_log(format!("[WARN] team view aborted: {err}"));
            }
        }
    }

    pub fn recompute_match_view(&mut self) {
        let Some(choice) = self.selected_match().cloned() else {
            self.match_view = None;
            self.match_error = Some("no match selected".to_string());
            return;
        };
        match build_match_view(&mut self.store, choice.match_id, &choice.label) {
            Ok(view) => {
                self.match_view = Some(view);
                self.match_error = None;
            }
            Err(err) => {
                self.match_view = None;
                self.match_error = Some(err.to_string());
                self.push_log(format!("[WARN] match view aborted: {err}"));
            }
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }
}

pub fn build_series_view(records: &[MatchRecord]) -> SeriesView {
    SeriesView {
        wins: wins_by_team(records),
        venues: venue_match_count_and_peak_runs(records),
        pairs: pair_dominance(records),
        toss_by_venue: toss_choice_by_venue(records),
    }
}

pub fn build_team_view(store: &DataStore, team: &str) -> Result<TeamView> {
    let squad = store.load_squad(team)?;
    let records = store.load_merged_matches()?;
    Ok(TeamView {
        team: team.to_string(),
        distribution: squad_distribution(&squad),
        cities: matches_by_city(team, &records),
        overseas: overseas_roster(&squad),
        record_by_city: won_vs_played_by_city(team, &records),
        toss_record: toss_win_rate(team, &records),
        toss_choices: toss_choice_breakdown(team, &records),
    })
}

pub fn build_match_view(store: &mut DataStore, match_id: u32, label: &str) -> Result<MatchView> {
    let (first, second) = store.innings(match_id)?;
    let first_view = build_innings_view(first)?;
    let second_view = build_innings_view(second)?;
    Ok(MatchView {
        label: label.to_string(),
        first: first_view,
        second: second_view,
    })
}

pub fn build_innings_view(innings: &Innings) -> Result<InningsView> {
    Ok(InningsView {
        team: innings.team().to_string(),
        kpis: kpis(&innings.batting)?,
        dismissals: dismissal_distribution(&innings.batting),
        boundaries: boundary_totals(&innings.batting),
        batting: batting_performance_series(&innings.batting),
        bowling: bowling_performance_series(&innings.bowling),
        catches: fielder_catch_matrix(&innings.batting),
    })
}

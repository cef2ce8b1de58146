use std::path::PathBuf;

use ipl_terminal::data::DataStore;
use ipl_terminal::state::{AppState, Screen};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn app() -> AppState {
    let mut state = AppState::new(DataStore::new(fixtures_dir()));
    state.init();
    state
}

#[test]
fn selectors_derive_from_source_files() {
    let state = app();

    // Distinct Team1 values, underscored, first-seen order.
    assert_eq!(
        state.teams,
        vec![
            "Chennai_Super_Kings".to_string(),
            "Royal_Challengers_Bengaluru".to_string(),
            "Mumbai_Indians".to_string(),
        ]
    );

    // "date, name" labels in chronological order.
    assert_eq!(state.match_choices.len(), 4);
    assert_eq!(
        state.match_choices[0].label,
        "2025-03-22, Chennai Super Kings vs Mumbai Indians"
    );
    assert_eq!(state.match_choices[0].match_id, 1);
}

#[test]
fn series_view_computes_on_startup() {
    let state = app();
    let view = state.series_view.as_ref().expect("series view should load");
    assert!(state.series_error.is_none());
    assert_eq!(view.wins[0].team, "Chennai Super Kings");
    assert_eq!(view.pairs.len(), 3);
}

#[test]
fn tab_activation_recomputes_that_view() {
    let mut state = app();
    assert!(state.team_view.is_none());

    state.set_screen(Screen::Team);
    let view = state.team_view.as_ref().expect("team view should load");
    assert_eq!(view.team, "Chennai_Super_Kings");
    assert_eq!(view.overseas.len(), 3);

    state.set_screen(Screen::Match);
    let view = state.match_view.as_ref().expect("match view should load");
    assert_eq!(view.first.team, "Chennai Super Kings");
    assert_eq!(view.first.kpis.total_runs, 150);
    assert_eq!(view.second.kpis.total_runs, 95);
}

#[test]
fn selection_change_recomputes_and_failures_abort_the_view() {
    let mut state = app();
    state.set_screen(Screen::Match);
    assert!(state.match_view.is_some());

    // The next match in date order has no scorecard fixture: the whole view
    // aborts, nothing partial is kept.
    state.select_next();
    assert_eq!(state.match_selected, 1);
    assert!(state.match_view.is_none());
    assert!(state.match_error.is_some());
    assert!(state.logs.iter().any(|line| line.contains("[WARN]")));

    // Selecting back recovers through the memoized scorecard.
    state.select_prev();
    assert!(state.match_view.is_some());
    assert!(state.match_error.is_none());
}

#[test]
fn missing_data_dir_aborts_series_view() {
    let mut state = AppState::new(DataStore::new("/nonexistent/ipl-data"));
    state.init();
    assert!(state.series_view.is_none());
    assert!(state.series_error.is_some());
}

#[test]
fn team_selector_wraps_around() {
    let mut state = app();
    state.set_screen(Screen::Team);
    state.select_prev();
    assert_eq!(state.selected_team(), Some("Mumbai_Indians"));
    // No squad fixture for Mumbai: the team view aborts with NotFound.
    assert!(state.team_view.is_none());
    assert!(state.team_error.is_some());

    state.select_next();
    assert_eq!(state.selected_team(), Some("Chennai_Super_Kings"));
    assert!(state.team_view.is_some());
}

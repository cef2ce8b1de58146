use std::path::PathBuf;

use ipl_terminal::data::{BattingEntry, DataError, DataStore};
use ipl_terminal::match_analysis::{
    batting_performance_series, boundary_totals, bowling_performance_series,
    dismissal_distribution, fielder_catch_matrix, kpis,
};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn entry(
    batsman: &str,
    catcher: Option<&str>,
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    dismissal: Option<&str>,
) -> BattingEntry {
    BattingEntry {
        batsman: batsman.to_string(),
        bowler: None,
        catcher: catcher.map(str::to_string),
        runs,
        balls,
        strike_rate: if balls == 0 {
            0.0
        } else {
            f64::from(runs) * 100.0 / f64::from(balls)
        },
        fours,
        sixes,
        dismissal: dismissal.map(str::to_string),
    }
}

#[test]
fn kpis_single_not_out_batsman() {
    let batting = vec![entry("X", None, 50, 25, 0, 0, None)];
    let row = kpis(&batting).expect("kpis should compute");
    assert_eq!(row.total_runs, 50);
    assert_eq!(row.total_balls, 25);
    assert_eq!(row.team_strike_rate, 200.0);
    assert_eq!(row.total_dismissals, 0);
}

#[test]
fn kpis_zero_balls_is_an_error() {
    let batting = vec![entry("X", None, 0, 0, 0, 0, None)];
    let err = kpis(&batting).unwrap_err();
    assert!(matches!(err, DataError::ZeroBalls));
}

#[test]
fn kpis_rounds_strike_rate_to_two_decimals() {
    let mut store = DataStore::new(fixtures_dir());
    let (first, _) = store.innings(1).expect("scorecard should load").clone();
    let row = kpis(&first.batting).expect("kpis should compute");
    assert_eq!(row.total_runs, 150);
    assert_eq!(row.total_balls, 96);
    assert_eq!(row.team_strike_rate, 156.25);
    assert_eq!(row.total_dismissals, 3);
}

#[test]
fn dismissal_distribution_skips_not_out() {
    let batting = vec![
        entry("A", Some("F"), 10, 8, 0, 0, Some("caught")),
        entry("B", Some("F"), 12, 9, 0, 0, Some("caught")),
        entry("C", None, 3, 6, 0, 0, Some("bowled")),
        entry("D", None, 40, 22, 0, 0, None),
    ];
    let rows = dismissal_distribution(&batting);
    assert_eq!(rows, vec![("caught".to_string(), 2), ("bowled".to_string(), 1)]);
}

#[test]
fn boundary_totals_aggregate_per_batsman_and_innings() {
    let batting = vec![
        entry("A", None, 40, 20, 4, 2, None),
        entry("B", None, 12, 10, 1, 0, Some("bowled")),
    ];
    let totals = boundary_totals(&batting);
    assert_eq!(totals.fours, 5);
    assert_eq!(totals.sixes, 2);
    let a = totals
        .per_batsman
        .iter()
        .find(|row| row.batsman == "A")
        .expect("batsman row should exist");
    assert_eq!((a.fours, a.sixes), (4, 2));
}

#[test]
fn performance_series_keep_innings_order() {
    let mut store = DataStore::new(fixtures_dir());
    let (first, _) = store.innings(1).expect("scorecard should load").clone();

    let batting = batting_performance_series(&first.batting);
    assert_eq!(batting[0].batsman, "Ruturaj Gaikwad");
    assert_eq!(batting[0].runs, 63);
    assert_eq!(batting[0].strike_rate, 153.66);

    let bowling = bowling_performance_series(&first.bowling);
    assert_eq!(bowling.len(), 2);
    assert_eq!(bowling[1].bowler, "Trent Boult");
    assert_eq!(bowling[1].extras, 3);
    assert_eq!(bowling[1].economy, 8.75);
}

#[test]
fn catch_matrix_covers_every_input_pair() {
    let batting = vec![
        entry("A", Some("F1"), 10, 8, 0, 0, Some("caught")),
        entry("B", Some("F1"), 12, 9, 0, 0, Some("caught")),
        entry("C", Some("F2"), 3, 6, 0, 0, Some("caught")),
        entry("D", None, 40, 22, 0, 0, None),
    ];
    let matrix = fielder_catch_matrix(&batting);

    // Every (catcher, batsman) pair from the input is present with count >= 1.
    assert_eq!(matrix.count("F1", "A"), 1);
    assert_eq!(matrix.count("F1", "B"), 1);
    assert_eq!(matrix.count("F2", "C"), 1);
    // All other combinations are materialized as zero.
    assert_eq!(matrix.count("F2", "A"), 0);
    assert_eq!(matrix.count("F1", "C"), 0);
    // Not-out rows contribute no catcher column at all.
    assert!(!matrix.batsmen.contains(&"D".to_string()));
    assert_eq!(matrix.row_total(0) + matrix.row_total(1), 3);
}

#[test]
fn catch_matrix_counts_repeat_pairs() {
    let batting = vec![
        entry("A", Some("F"), 10, 8, 0, 0, Some("caught")),
        entry("A", Some("F"), 5, 4, 0, 0, Some("caught")),
    ];
    let matrix = fielder_catch_matrix(&batting);
    assert_eq!(matrix.count("F", "A"), 2);
}

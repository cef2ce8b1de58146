use std::path::PathBuf;

use ipl_terminal::data::{venue_city, DataError, DataStore};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

#[test]
fn match_listing_loads_in_file_order() {
    let store = DataStore::new(fixtures_dir());
    let listing = store.load_match_listing().expect("listing should load");
    assert_eq!(listing.len(), 4);
    assert_eq!(listing[0].match_id, 1);
    assert_eq!(listing[0].match_date, "2025-03-22");
    assert_eq!(listing[3].match_name, "Chennai Super Kings vs Mumbai Indians");
}

#[test]
fn match_info_empty_winner_is_none() {
    let store = DataStore::new(fixtures_dir());
    let info = store.load_match_info().expect("info should load");
    assert_eq!(info.len(), 4);
    assert_eq!(info[0].match_winner.as_deref(), Some("Chennai Super Kings"));
    assert!(info[2].match_winner.is_none());
}

#[test]
fn merged_matches_join_on_id() {
    let store = DataStore::new(fixtures_dir());
    let merged = store.load_merged_matches().expect("merge should load");
    assert_eq!(merged.len(), 4);
    assert_eq!(merged[0].id, 1);
    assert_eq!(merged[0].match_date, "2025-03-22");
    assert_eq!(merged[0].city(), "Chennai");
    // Venue without a comma keeps the full string.
    assert_eq!(merged[3].city(), "Eden Gardens");
}

#[test]
fn venue_city_trims_after_first_comma() {
    assert_eq!(venue_city("MA Chidambaram Stadium, Chennai"), "Chennai");
    assert_eq!(venue_city("Stadium, City, Extra"), "City, Extra");
    assert_eq!(venue_city("Eden Gardens"), "Eden Gardens");
}

#[test]
fn squad_loads_by_selector_name() {
    let store = DataStore::new(fixtures_dir());
    let squad = store
        .load_squad("Chennai_Super_Kings")
        .expect("squad should load");
    assert_eq!(squad.len(), 8);
    assert_eq!(squad[0].name, "Ruturaj Gaikwad");
    // Bowler style comes from the bowling column.
    let pathirana = squad
        .iter()
        .find(|m| m.name == "Matheesha Pathirana")
        .expect("player should exist");
    assert_eq!(pathirana.style(), Some("Right-arm fast"));
}

#[test]
fn missing_squad_is_not_found() {
    let store = DataStore::new(fixtures_dir());
    let err = store.load_squad("Gotham_Giants").unwrap_err();
    assert!(matches!(err, DataError::NotFound { what: "squad", .. }));
}

#[test]
fn scorecard_flattens_nested_names() {
    let mut store = DataStore::new(fixtures_dir());
    let (first, second) = store.innings(1).expect("scorecard should load").clone();

    assert_eq!(first.team(), "Chennai Super Kings");
    assert_eq!(second.team(), "Mumbai Indians");
    assert_eq!(first.batting[0].batsman, "Ruturaj Gaikwad");
    assert_eq!(first.batting[0].bowler.as_deref(), Some("Jasprit Bumrah"));
    assert_eq!(first.batting[0].catcher.as_deref(), Some("Hardik Pandya"));
    assert!(first.batting[2].bowler.is_none());
    assert_eq!(second.bowling[0].bowler, "Matheesha Pathirana");
    assert_eq!(second.bowling[0].extras(), 5);
}

#[test]
fn memoized_innings_are_structurally_identical() {
    let mut store = DataStore::new(fixtures_dir());
    let first_read = store.innings(1).expect("scorecard should load").clone();
    let second_read = store.innings(1).expect("memo hit should load").clone();
    assert_eq!(first_read, second_read);
}

#[test]
fn missing_scorecard_is_not_found() {
    let mut store = DataStore::new(fixtures_dir());
    let err = store.innings(404).unwrap_err();
    assert!(matches!(err, DataError::NotFound { what: "scorecard", .. }));
}

#[test]
fn one_innings_scorecard_is_shape_error() {
    let mut store = DataStore::new(fixtures_dir());
    let err = store.innings(9).unwrap_err();
    assert!(matches!(err, DataError::Shape { .. }));
}

#[test]
fn missing_data_dir_is_file_read_error() {
    let store = DataStore::new("/nonexistent/ipl-data");
    let err = store.load_match_listing().unwrap_err();
    assert!(matches!(err, DataError::FileRead { .. }));
}

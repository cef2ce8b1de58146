use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const MATCH_LIST_FILE: &str = "match_list.csv";
const MATCH_INFO_FILE: &str = "match_info.csv";
const SQUAD_DIR: &str = "squad";
const SCORECARD_DIR: &str = "scorecard";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected shape in {path}: {detail}")]
    Shape { path: PathBuf, detail: String },
    #[error("no {what} found for {key}")]
    NotFound { what: &'static str, key: String },
    #[error("zero balls faced, strike rate is undefined")]
    ZeroBalls,
}

pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Debug, Clone, Deserialize)]
pub struct MatchListing {
    #[serde(rename = "MatchID")]
    pub match_id: u32,
    #[serde(rename = "MatchDate")]
    pub match_date: String,
    #[serde(rename = "MatchName")]
    pub match_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchInfo {
    pub id: u32,
    #[serde(rename = "Team1")]
    pub team1: String,
    #[serde(rename = "Team2")]
    pub team2: String,
    // Empty on no-result matches.
    #[serde(rename = "matchWinner")]
    pub match_winner: Option<String>,
    #[serde(rename = "tossWinner")]
    pub toss_winner: String,
    #[serde(rename = "tossChoice")]
    pub toss_choice: String,
    #[serde(rename = "MatchVenue")]
    pub venue: String,
    pub r1: u32,
    pub r2: u32,
}

/// One merged row of match info + match listing, joined on id.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub id: u32,
    pub team1: String,
    pub team2: String,
    pub match_winner: Option<String>,
    pub toss_winner: String,
    pub toss_choice: String,
    pub venue: String,
    pub r1: u32,
    pub r2: u32,
    pub match_date: String,
    pub match_name: String,
}

impl MatchRecord {
    pub fn city(&self) -> &str {
        venue_city(&self.venue)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// Peak single-innings total for the match.
    pub fn peak_runs(&self) -> u32 {
        self.r1.max(self.r2)
    }

    pub fn toss_choice_kind(&self) -> Option<TossChoice> {
        parse_toss_choice(&self.toss_choice)
    }
}

/// Winner's declared toss choice. Raw strings vary ("bat", "Bat", "bowl",
/// "field"); anything unrecognizable is dropped from the crosstabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossChoice {
    Bat,
    Field,
}

pub fn parse_toss_choice(raw: &str) -> Option<TossChoice> {
    let lower = raw.trim().to_lowercase();
    if lower.starts_with("bat") {
        Some(TossChoice::Bat)
    } else if lower.starts_with("field") || lower.starts_with("bowl") {
        Some(TossChoice::Field)
    } else {
        None
    }
}

/// City-level venue label: the text after the first comma of the raw venue
/// string. Venues without a comma keep the full string.
pub fn venue_city(raw: &str) -> &str {
    match raw.split_once(',') {
        Some((_, rest)) => rest.trim(),
        None => raw.trim(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadMember {
    pub name: String,
    pub country: String,
    pub role: String,
    #[serde(rename = "battingStyle")]
    pub batting_style: Option<String>,
    #[serde(rename = "bowlingStyle")]
    pub bowling_style: Option<String>,
}

impl SquadMember {
    /// Style relevant to the player's role; None for unrecognized roles.
    pub fn style(&self) -> Option<&str> {
        match self.role.to_lowercase().as_str() {
            "bowler" | "bowling allrounder" => self.bowling_style.as_deref(),
            "batsman" | "batting allrounder" | "wk-batsman" => self.batting_style.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattingEntry {
    pub batsman: String,
    pub bowler: Option<String>,
    pub catcher: Option<String>,
    pub runs: u32,
    pub balls: u32,
    pub strike_rate: f64,
    pub fours: u32,
    pub sixes: u32,
    pub dismissal: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BowlingEntry {
    pub bowler: String,
    pub runs: u32,
    pub economy: f64,
    pub no_balls: u32,
    pub wides: u32,
}

impl BowlingEntry {
    pub fn extras(&self) -> u32 {
        self.no_balls + self.wides
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Innings {
    pub inning: String,
    pub batting: Vec<BattingEntry>,
    pub bowling: Vec<BowlingEntry>,
}

impl Innings {
    /// Team name from the innings tag ("<Team> Inning 1" -> "<Team>").
    pub fn team(&self) -> &str {
        match self.inning.rfind(" Inning ") {
            Some(idx) => &self.inning[..idx],
            None => self.inning.as_str(),
        }
    }
}

// Raw scorecard documents nest batsman/bowler/catcher as {"name": ...}
// sub-objects; they are flattened to plain strings at load time.
#[derive(Debug, Deserialize)]
struct RawName {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawBattingEntry {
    batsman: RawName,
    #[serde(default)]
    bowler: Option<RawName>,
    #[serde(default)]
    catcher: Option<RawName>,
    r: u32,
    b: u32,
    #[serde(default)]
    sr: f64,
    #[serde(rename = "4s", default)]
    fours: u32,
    #[serde(rename = "6s", default)]
    sixes: u32,
    #[serde(default)]
    dismissal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBowlingEntry {
    bowler: RawName,
    r: u32,
    #[serde(default)]
    eco: f64,
    #[serde(default)]
    nb: u32,
    #[serde(default)]
    wd: u32,
}

#[derive(Debug, Deserialize)]
struct RawInnings {
    inning: String,
    #[serde(default)]
    batting: Vec<RawBattingEntry>,
    #[serde(default)]
    bowling: Vec<RawBowlingEntry>,
}

impl From<RawInnings> for Innings {
    fn from(raw: RawInnings) -> Self {
        Self {
            inning: raw.inning,
            batting: raw
                .batting
                .into_iter()
                .map(|entry| BattingEntry {
                    batsman: entry.batsman.name,
                    bowler: entry.bowler.map(|n| n.name),
                    catcher: entry.catcher.map(|n| n.name),
                    runs: entry.r,
                    balls: entry.b,
                    strike_rate: entry.sr,
                    fours: entry.fours,
                    sixes: entry.sixes,
                    dismissal: entry.dismissal,
                })
                .collect(),
            bowling: raw
                .bowling
                .into_iter()
                .map(|entry| BowlingEntry {
                    bowler: entry.bowler.name,
                    runs: entry.r,
                    economy: entry.eco,
                    no_balls: entry.nb,
                    wides: entry.wd,
                })
                .collect(),
        }
    }
}

/// Flat-file loader for one session. Scorecards are memoized per match id;
/// everything else is re-read on each call.
#[derive(Debug)]
pub struct DataStore {
    data_dir: PathBuf,
    scorecards: HashMap<u32, (Innings, Innings)>,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            scorecards: HashMap::new(),
        }
    }

    pub fn from_env() -> Self {
        let dir = std::env::var("IPL_DATA_DIR")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| "data".to_string());
        Self::new(dir)
    }

    pub fn load_match_listing(&self) -> Result<Vec<MatchListing>> {
        read_csv(&self.data_dir.join(MATCH_LIST_FILE))
    }

    pub fn load_match_info(&self) -> Result<Vec<MatchInfo>> {
        read_csv(&self.data_dir.join(MATCH_INFO_FILE))
    }

    /// Inner join of match info and match listing on id, in match-info order.
    pub fn load_merged_matches(&self) -> Result<Vec<MatchRecord>> {
        let listing = self.load_match_listing()?;
        let by_id: HashMap<u32, &MatchListing> =
            listing.iter().map(|row| (row.match_id, row)).collect();

        let merged = self
            .load_match_info()?
            .into_iter()
            .filter_map(|info| {
                let row = by_id.get(&info.id)?;
                Some(MatchRecord {
                    id: info.id,
                    team1: info.team1,
                    team2: info.team2,
                    match_winner: info.match_winner,
                    toss_winner: info.toss_winner,
                    toss_choice: info.toss_choice,
                    venue: info.venue,
                    r1: info.r1,
                    r2: info.r2,
                    match_date: row.match_date.clone(),
                    match_name: row.match_name.clone(),
                })
            })
            .collect();
        Ok(merged)
    }

    /// Squad roster for a team. Accepts the underscored selector form;
    /// squad files are named with underscores in place of spaces.
    pub fn load_squad(&self, team_name: &str) -> Result<Vec<SquadMember>> {
        let file = format!("{}.csv", team_name.replace(' ', "_"));
        let path = self.data_dir.join(SQUAD_DIR).join(file);
        if !path.exists() {
            return Err(DataError::NotFound {
                what: "squad",
                key: team_name.to_string(),
            });
        }
        read_csv(&path)
    }

    /// Both innings of a match, memoized per match id for the session.
    pub fn innings(&mut self, match_id: u32) -> Result<&(Innings, Innings)> {
        if !self.scorecards.contains_key(&match_id) {
            let pair = self.read_scorecard(match_id)?;
            self.scorecards.insert(match_id, pair);
        }
        Ok(&self.scorecards[&match_id])
    }

    fn read_scorecard(&self, match_id: u32) -> Result<(Innings, Innings)> {
        let path = self
            .data_dir
            .join(SCORECARD_DIR)
            .join(format!("{match_id}.json"));
        let raw = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DataError::NotFound {
                    what: "scorecard",
                    key: match_id.to_string(),
                }
            } else {
                DataError::FileRead {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let innings: Vec<RawInnings> =
            serde_json::from_str(&raw).map_err(|source| DataError::Json {
                path: path.clone(),
                source,
            })?;
        let [first, second]: [RawInnings; 2] =
            innings.try_into().map_err(|rest: Vec<RawInnings>| DataError::Shape {
                path,
                detail: format!("expected 2 innings, found {}", rest.len()),
            })?;
        Ok((Innings::from(first), Innings::from(second)))
    }
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(raw.as_bytes());
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?);
    }
    Ok(rows)
}

pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 5] = [
        "%Y-%m-%d",
        "%d-%m-%Y",
        "%d/%m/%Y",
        "%b %d, %Y",
        "%d %b %Y",
    ];

    let cleaned = raw.trim();
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            return Some(date);
        }
    }
    None
}

use std::collections::BTreeMap;

use crate::data::{BattingEntry, BowlingEntry, DataError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub total_runs: u32,
    pub total_balls: u32,
    pub team_strike_rate: f64,
    pub total_dismissals: u32,
}

/// Innings-level KPI row. The strike-rate division is guarded: an innings
/// with zero balls faced is an error, not NaN.
pub fn kpis(batting: &[BattingEntry]) -> Result<Kpis> {
    let total_runs: u32 = batting.iter().map(|e| e.runs).sum();
    let total_balls: u32 = batting.iter().map(|e| e.balls).sum();
    if total_balls == 0 {
        return Err(DataError::ZeroBalls);
    }
    let rate = f64::from(total_runs) * 100.0 / f64::from(total_balls);
    Ok(Kpis {
        total_runs,
        total_balls,
        team_strike_rate: (rate * 100.0).round() / 100.0,
        total_dismissals: batting.iter().filter(|e| e.dismissal.is_some()).count() as u32,
    })
}

/// Counts per dismissal type, most common first. Not-out rows excluded.
pub fn dismissal_distribution(batting: &[BattingEntry]) -> Vec<(String, u32)> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for entry in batting {
        if let Some(kind) = entry.dismissal.as_deref() {
            *counts.entry(kind).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(kind, count)| (kind.to_string(), count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatsmanBoundaries {
    pub batsman: String,
    pub fours: u32,
    pub sixes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryTotals {
    pub per_batsman: Vec<BatsmanBoundaries>,
    pub fours: u32,
    pub sixes: u32,
}

/// Fours and sixes per batsman plus innings aggregates for the pie split.
pub fn boundary_totals(batting: &[BattingEntry]) -> BoundaryTotals {
    let mut per_batsman: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for entry in batting {
        let row = per_batsman.entry(entry.batsman.as_str()).or_insert((0, 0));
        row.0 += entry.fours;
        row.1 += entry.sixes;
    }

    let per_batsman: Vec<BatsmanBoundaries> = per_batsman
        .into_iter()
        .map(|(batsman, (fours, sixes))| BatsmanBoundaries {
            batsman: batsman.to_string(),
            fours,
            sixes,
        })
        .collect();
    BoundaryTotals {
        fours: per_batsman.iter().map(|row| row.fours).sum(),
        sixes: per_batsman.iter().map(|row| row.sixes).sum(),
        per_batsman,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatsmanPerf {
    pub batsman: String,
    pub runs: u32,
    pub strike_rate: f64,
}

/// Runs and strike rate per batsman, in batting order (dual-axis shape).
pub fn batting_performance_series(batting: &[BattingEntry]) -> Vec<BatsmanPerf> {
    batting
        .iter()
        .map(|entry| BatsmanPerf {
            batsman: entry.batsman.clone(),
            runs: entry.runs,
            strike_rate: entry.strike_rate,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BowlerPerf {
    pub bowler: String,
    pub runs_conceded: u32,
    pub extras: u32,
    pub economy: f64,
}

/// Runs conceded, extras (no-balls + wides) and economy per bowler.
pub fn bowling_performance_series(bowling: &[BowlingEntry]) -> Vec<BowlerPerf> {
    bowling
        .iter()
        .map(|entry| BowlerPerf {
            bowler: entry.bowler.clone(),
            runs_conceded: entry.runs,
            extras: entry.extras(),
            economy: entry.economy,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatchMatrix {
    pub catchers: Vec<String>,
    pub batsmen: Vec<String>,
    /// counts[catcher_idx][batsman_idx]; absent combinations are 0.
    pub counts: Vec<Vec<u32>>,
}

impl CatchMatrix {
    pub fn count(&self, catcher: &str, batsman: &str) -> u32 {
        let Some(row) = self.catchers.iter().position(|c| c == catcher) else {
            return 0;
        };
        let Some(col) = self.batsmen.iter().position(|b| b == batsman) else {
            return 0;
        };
        self.counts[row][col]
    }

    pub fn row_total(&self, catcher_idx: usize) -> u32 {
        self.counts[catcher_idx].iter().sum()
    }
}

/// Catcher x batsman pivot of catch counts. Rows without a catcher are
/// excluded; every combination of the remaining labels is materialized.
pub fn fielder_catch_matrix(batting: &[BattingEntry]) -> CatchMatrix {
    let mut pairs: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    for entry in batting {
        if let Some(catcher) = entry.catcher.as_deref() {
            *pairs.entry((catcher, entry.batsman.as_str())).or_insert(0) += 1;
        }
    }

    let mut catchers: Vec<String> = Vec::new();
    let mut batsmen: Vec<String> = Vec::new();
    for (catcher, batsman) in pairs.keys() {
        if !catchers.iter().any(|c| c == catcher) {
            catchers.push(catcher.to_string());
        }
        if !batsmen.iter().any(|b| b == batsman) {
            batsmen.push(batsman.to_string());
        }
    }

    let counts = catchers
        .iter()
        .map(|catcher| {
            batsmen
                .iter()
                .map(|batsman| {
                    pairs
                        .get(&(catcher.as_str(), batsman.as_str()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    CatchMatrix {
        catchers,
        batsmen,
        counts,
    }
}

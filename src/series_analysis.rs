use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::data::{MatchRecord, TossChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamWins {
    pub team: String,
    pub wins: u32,
}

/// Win count per team across the series. No-result rows (no winner) are
/// excluded, so the win total can be lower than the match count.
pub fn wins_by_team(matches: &[MatchRecord]) -> Vec<TeamWins> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for m in matches {
        if let Some(winner) = m.match_winner.as_deref() {
            *counts.entry(winner).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<TeamWins> = counts
        .into_iter()
        .map(|(team, wins)| TeamWins {
            team: team.to_string(),
            wins,
        })
        .collect();
    rows.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.team.cmp(&b.team)));
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueStats {
    pub city: String,
    pub matches: u32,
    pub peak_runs: u32,
}

/// Match count and peak single-innings total per venue, at city granularity.
pub fn venue_match_count_and_peak_runs(matches: &[MatchRecord]) -> Vec<VenueStats> {
    let mut per_city: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for m in matches {
        let entry = per_city.entry(m.city()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = entry.1.max(m.peak_runs());
    }

    per_city
        .into_iter()
        .map(|(city, (count, peak))| VenueStats {
            city: city.to_string(),
            matches: count,
            peak_runs: peak,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairDominance {
    pub team: String,
    pub played: u32,
    pub won: u32,
    /// Opponents beaten both as Team1 and as Team2 across this team's wins.
    pub dominating: Vec<String>,
}

/// Played/won/dominating rows, one per distinct Team1 value, in first-seen
/// order.
pub fn pair_dominance(matches: &[MatchRecord]) -> Vec<PairDominance> {
    let mut teams: Vec<&str> = Vec::new();
    for m in matches {
        if !teams.contains(&m.team1.as_str()) {
            teams.push(m.team1.as_str());
        }
    }

    teams
        .iter()
        .map(|&team| {
            let played = matches.iter().filter(|m| m.involves(team)).count() as u32;
            let wins: Vec<&MatchRecord> = matches
                .iter()
                .filter(|m| m.match_winner.as_deref() == Some(team))
                .collect();

            let as_team1: BTreeSet<&str> = wins.iter().map(|m| m.team1.as_str()).collect();
            let as_team2: BTreeSet<&str> = wins.iter().map(|m| m.team2.as_str()).collect();
            let dominating = as_team1
                .intersection(&as_team2)
                .filter(|&&name| name != team)
                .map(|name| name.to_string())
                .collect();

            PairDominance {
                team: team.to_string(),
                played,
                won: wins.len() as u32,
                dominating,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueTossChoices {
    pub city: String,
    pub bat: u32,
    pub field: u32,
}

/// Venue x toss-choice crosstab at city granularity.
pub fn toss_choice_by_venue(matches: &[MatchRecord]) -> Vec<VenueTossChoices> {
    let mut per_city: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for m in matches {
        let Some(choice) = m.toss_choice_kind() else {
            continue;
        };
        let entry = per_city.entry(m.city()).or_insert((0, 0));
        match choice {
            TossChoice::Bat => entry.0 += 1,
            TossChoice::Field => entry.1 += 1,
        }
    }

    per_city
        .into_iter()
        .map(|(city, (bat, field))| VenueTossChoices {
            city: city.to_string(),
            bat,
            field,
        })
        .collect()
}

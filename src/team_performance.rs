use std::collections::BTreeMap;

use crate::data::{MatchRecord, SquadMember, TossChoice};

/// Selector-form team names carry underscores; the match and squad tables
/// store spaces.
pub fn display_team_name(selector: &str) -> String {
    selector.replace('_', " ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleGroup {
    pub style: String,
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGroup {
    pub role: String,
    pub players: u32,
    pub styles: Vec<StyleGroup>,
}

/// Role -> style -> player hierarchy for the sunburst-style breakdown.
/// Members whose role maps to no style are dropped, as the original chart
/// dropped rows with an empty path segment.
pub fn squad_distribution(squad: &[SquadMember]) -> Vec<RoleGroup> {
    let mut tree: BTreeMap<&str, BTreeMap<&str, Vec<String>>> = BTreeMap::new();
    for member in squad {
        let Some(style) = member.style() else {
            continue;
        };
        tree.entry(member.role.as_str())
            .or_default()
            .entry(style)
            .or_default()
            .push(member.name.clone());
    }

    tree.into_iter()
        .map(|(role, styles)| {
            let styles: Vec<StyleGroup> = styles
                .into_iter()
                .map(|(style, players)| StyleGroup {
                    style: style.to_string(),
                    players,
                })
                .collect();
            RoleGroup {
                role: role.to_string(),
                players: styles.iter().map(|s| s.players.len() as u32).sum(),
                styles,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityScore {
    pub city: String,
    pub matches: u32,
    pub avg_peak_runs: f64,
}

/// Match count and mean per-match peak innings total by city, over the
/// team's matches.
pub fn matches_by_city(team_name: &str, matches: &[MatchRecord]) -> Vec<CityScore> {
    let team = display_team_name(team_name);
    let mut per_city: BTreeMap<&str, (u32, u64)> = BTreeMap::new();
    for m in matches.iter().filter(|m| m.involves(&team)) {
        let entry = per_city.entry(m.city()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u64::from(m.peak_runs());
    }

    per_city
        .into_iter()
        .map(|(city, (count, total))| CityScore {
            city: city.to_string(),
            matches: count,
            avg_peak_runs: total as f64 / f64::from(count),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverseasPlayer {
    pub name: String,
    pub country: String,
    pub role: String,
}

pub fn overseas_roster(squad: &[SquadMember]) -> Vec<OverseasPlayer> {
    squad
        .iter()
        .filter(|member| member.country != "India")
        .map(|member| OverseasPlayer {
            name: member.name.clone(),
            country: member.country.clone(),
            role: member.role.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRecord {
    pub city: String,
    pub played: u32,
    pub won: u32,
}

/// Played vs won by city. A city the team played in but never won at keeps
/// an explicit zero rather than dropping out.
pub fn won_vs_played_by_city(team_name: &str, matches: &[MatchRecord]) -> Vec<CityRecord> {
    let team = display_team_name(team_name);
    let mut per_city: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for m in matches.iter().filter(|m| m.involves(&team)) {
        let entry = per_city.entry(m.city()).or_insert((0, 0));
        entry.0 += 1;
        if m.match_winner.as_deref() == Some(team.as_str()) {
            entry.1 += 1;
        }
    }

    per_city
        .into_iter()
        .map(|(city, (played, won))| CityRecord {
            city: city.to_string(),
            played,
            won,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TossRecord {
    pub won: u32,
    pub lost: u32,
}

impl TossRecord {
    pub fn win_pct(&self) -> f64 {
        let total = self.won + self.lost;
        if total == 0 {
            0.0
        } else {
            f64::from(self.won) * 100.0 / f64::from(total)
        }
    }
}

/// Tosses won and lost over all matches involving the team.
pub fn toss_win_rate(team_name: &str, matches: &[MatchRecord]) -> TossRecord {
    let team = display_team_name(team_name);
    let mut record = TossRecord { won: 0, lost: 0 };
    for m in matches.iter().filter(|m| m.involves(&team)) {
        if m.toss_winner == team {
            record.won += 1;
        } else {
            record.lost += 1;
        }
    }
    record
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TossChoiceSplit {
    pub bat: u32,
    pub field: u32,
}

/// Bat vs field counts, restricted to tosses the team actually won.
pub fn toss_choice_breakdown(team_name: &str, matches: &[MatchRecord]) -> TossChoiceSplit {
    let team = display_team_name(team_name);
    let mut split = TossChoiceSplit { bat: 0, field: 0 };
    for m in matches
        .iter()
        .filter(|m| m.involves(&team) && m.toss_winner == team)
    {
        match m.toss_choice_kind() {
            Some(TossChoice::Bat) => split.bat += 1,
            Some(TossChoice::Field) => split.field += 1,
            None => {}
        }
    }
    split
}

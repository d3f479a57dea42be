use crate::core::scorers::total_goals;
use crate::domain::model::{
    DashboardSummary, LeagueSnapshot, Match, MatchStatus, Player, Position, Team, TeamId,
};
use crate::utils::error::{LeagueError, Result};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchGroups<'a> {
    pub live: Vec<&'a Match>,
    pub upcoming: Vec<&'a Match>,
    pub finished: Vec<&'a Match>,
}

pub fn group_by_status(matches: &[Match]) -> MatchGroups<'_> {
    let mut groups = MatchGroups::default();
    for m in matches {
        match m.status {
            MatchStatus::InPlay => groups.live.push(m),
            MatchStatus::Scheduled => groups.upcoming.push(m),
            MatchStatus::Finished => groups.finished.push(m),
        }
    }
    groups
}

/// `None` keeps every match.
pub fn filter_by_status(matches: &[Match], status: Option<MatchStatus>) -> Vec<&Match> {
    matches
        .iter()
        .filter(|m| status.map_or(true, |s| m.status == s))
        .collect()
}

/// Next `limit` scheduled matches, earliest kick-off first.
pub fn upcoming(matches: &[Match], limit: usize) -> Vec<&Match> {
    let mut scheduled = filter_by_status(matches, Some(MatchStatus::Scheduled));
    scheduled.sort_by(|a, b| a.date_time.cmp(&b.date_time).then_with(|| a.id.cmp(&b.id)));
    scheduled.truncate(limit);
    scheduled
}

/// Last `limit` finished matches, latest kick-off first.
pub fn recent(matches: &[Match], limit: usize) -> Vec<&Match> {
    let mut finished = filter_by_status(matches, Some(MatchStatus::Finished));
    finished.sort_by(|a, b| b.date_time.cmp(&a.date_time).then_with(|| b.id.cmp(&a.id)));
    finished.truncate(limit);
    finished
}

/// A match with both team names joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fixture<'a> {
    #[serde(rename = "match")]
    pub fixture: &'a Match,
    pub home_team: &'a str,
    pub away_team: &'a str,
}

impl Fixture<'_> {
    pub fn scoreline(&self) -> String {
        match self.fixture.status {
            MatchStatus::Scheduled => format!("{} vs {}", self.home_team, self.away_team),
            _ => format!(
                "{} {}-{} {}",
                self.home_team, self.fixture.home_score, self.fixture.away_score, self.away_team
            ),
        }
    }
}

pub fn resolve_fixtures<'a>(teams: &'a [Team], matches: &'a [Match]) -> Result<Vec<Fixture<'a>>> {
    let names: HashMap<TeamId, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let lookup = |m: &Match, team_id: TeamId| {
        names.get(&team_id).copied().ok_or_else(|| {
            LeagueError::validation(format!(
                "match {} references unknown team {}",
                m.id, team_id
            ))
        })
    };

    matches
        .iter()
        .map(|m| -> Result<Fixture<'a>> {
            Ok(Fixture {
                fixture: m,
                home_team: lookup(m, m.home_team_id)?,
                away_team: lookup(m, m.away_team_id)?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerQuery {
    pub search: Option<String>,
    pub position: Option<Position>,
    pub team_id: Option<TeamId>,
}

impl PlayerQuery {
    pub fn matches(&self, player: &Player) -> bool {
        let by_name = self.search.as_deref().map_or(true, |term| {
            player
                .full_name
                .to_lowercase()
                .contains(&term.trim().to_lowercase())
        });
        let by_position = self.position.map_or(true, |p| player.position == p);
        let by_team = self.team_id.map_or(true, |id| player.team_id == id);
        by_name && by_position && by_team
    }

    pub fn apply<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|p| self.matches(p)).collect()
    }
}

pub fn search_teams<'a>(teams: &'a [Team], term: &str) -> Vec<&'a Team> {
    let needle = term.trim().to_lowercase();
    teams
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

impl DashboardSummary {
    pub fn from_snapshot(snapshot: &LeagueSnapshot) -> Self {
        let groups = group_by_status(&snapshot.matches);
        Self {
            teams: snapshot.teams.len(),
            players: snapshot.players.len(),
            finished_matches: groups.finished.len(),
            live_matches: groups.live.len(),
            total_goals: total_goals(&snapshot.players),
        }
    }
}

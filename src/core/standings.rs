use crate::domain::model::{CompetitionId, Match, StandingRow, Team, TeamId};
use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::Validate;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Table order: points, goal difference, goals scored (all descending),
/// then team name and id ascending so that equal records never swap.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team.cmp(&b.team))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

fn goals(m: &Match, field: &str, value: i32) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        LeagueError::validation(format!(
            "match {}: {} cannot be negative (got {})",
            m.id, field, value
        ))
    })
}

/// Accumulates results one match at a time. Every match is checked against
/// the seeded teams before it touches a row.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    rows: Vec<StandingRow>,
    index: HashMap<TeamId, usize>,
    counted: usize,
}

impl TableBuilder {
    pub fn new(teams: &[Team]) -> Result<Self> {
        let mut index = HashMap::with_capacity(teams.len());
        let mut rows = Vec::with_capacity(teams.len());

        for team in teams {
            if index.insert(team.id, rows.len()).is_some() {
                return Err(LeagueError::validation(format!(
                    "duplicate team id {} ('{}')",
                    team.id, team.name
                )));
            }
            rows.push(StandingRow::new(team));
        }

        Ok(Self {
            rows,
            index,
            counted: 0,
        })
    }

    fn slot(&self, m: &Match, side: &str, team_id: TeamId) -> Result<usize> {
        self.index.get(&team_id).copied().ok_or_else(|| {
            LeagueError::validation(format!(
                "match {}: {} team {} is not part of the league",
                m.id, side, team_id
            ))
        })
    }

    /// Checks a match without folding it in.
    pub fn check(&self, m: &Match) -> Result<()> {
        m.validate()?;
        self.slot(m, "home", m.home_team_id)?;
        self.slot(m, "away", m.away_team_id)?;
        Ok(())
    }

    /// Folds a match into the table. Returns `false` for matches that are
    /// valid but not finished, which leave every counter untouched.
    pub fn record(&mut self, m: &Match) -> Result<bool> {
        m.validate()?;
        let home = self.slot(m, "home", m.home_team_id)?;
        let away = self.slot(m, "away", m.away_team_id)?;
        let home_goals = goals(m, "home_score", m.home_score)?;
        let away_goals = goals(m, "away_score", m.away_score)?;

        if !m.is_finished() {
            return Ok(false);
        }

        Self::apply_side(&mut self.rows[home], home_goals, away_goals);
        Self::apply_side(&mut self.rows[away], away_goals, home_goals);
        self.counted += 1;
        Ok(true)
    }

    // Each match adds at most i32::MAX goals, so the u64 counters and their
    // i64 difference stay in range for any table that fits in memory.
    fn apply_side(row: &mut StandingRow, scored: u64, conceded: u64) {
        row.played += 1;
        row.goals_for += scored;
        row.goals_against += conceded;
        row.goal_difference = row.goals_for as i64 - row.goals_against as i64;

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                row.won += 1;
                row.points += POINTS_FOR_WIN;
            }
            Ordering::Equal => {
                row.drawn += 1;
                row.points += POINTS_FOR_DRAW;
            }
            Ordering::Less => row.lost += 1,
        }
    }

    /// Number of finished matches folded in so far.
    pub fn matches_counted(&self) -> usize {
        self.counted
    }

    pub fn rows(&self) -> Vec<StandingRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(compare_rows);
        rows
    }

    pub fn finish(mut self) -> Vec<StandingRow> {
        self.rows.sort_by(compare_rows);
        self.rows
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StandingsEngine;

impl StandingsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Derives the ranked league table. Any invalid match fails the whole
    /// call; no table is returned in that case.
    pub fn compute(&self, teams: &[Team], matches: &[Match]) -> Result<Vec<StandingRow>> {
        let mut builder = TableBuilder::new(teams)?;
        for m in matches {
            builder.record(m)?;
        }

        tracing::debug!(
            "Standings computed for {} teams from {} finished of {} matches",
            teams.len(),
            builder.matches_counted(),
            matches.len()
        );

        Ok(builder.finish())
    }

    /// Table for a single competition. Only matches tagged with
    /// `competition_id` take part, and only those are validated.
    pub fn compute_for_competition(
        &self,
        teams: &[Team],
        matches: &[Match],
        competition_id: CompetitionId,
    ) -> Result<Vec<StandingRow>> {
        let in_scope: Vec<Match> = matches
            .iter()
            .filter(|m| m.competition_id == Some(competition_id))
            .cloned()
            .collect();
        tracing::debug!(
            "Competition {}: {} of {} matches in scope",
            competition_id,
            in_scope.len(),
            matches.len()
        );
        self.compute(teams, &in_scope)
    }
}

pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Result<Vec<StandingRow>> {
    StandingsEngine::new().compute(teams, matches)
}

pub fn compute_for_competition(
    teams: &[Team],
    matches: &[Match],
    competition_id: CompetitionId,
) -> Result<Vec<StandingRow>> {
    StandingsEngine::new().compute_for_competition(teams, matches, competition_id)
}

use crate::domain::model::{Player, ScorerRow};
use std::cmp::Ordering;

pub const DEFAULT_SCORERS_LIMIT: usize = 5;

fn compare_scorers(a: &Player, b: &Player) -> Ordering {
    b.goals
        .cmp(&a.goals)
        .then_with(|| b.assists.cmp(&a.assists))
        .then_with(|| a.full_name.cmp(&b.full_name))
        .then_with(|| a.id.cmp(&b.id))
}

impl From<&Player> for ScorerRow {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.id,
            full_name: player.full_name.clone(),
            team_name: player.team_name.clone(),
            goals: player.goals,
            assists: player.assists,
        }
    }
}

/// Every player, best scorer first. Goal ties go to the player with more
/// assists, then alphabetically.
pub fn rank_scorers(players: &[Player]) -> Vec<ScorerRow> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| compare_scorers(a, b));
    ranked.into_iter().map(ScorerRow::from).collect()
}

pub fn top_scorers(players: &[Player], limit: usize) -> Vec<ScorerRow> {
    let mut ranked = rank_scorers(players);
    ranked.truncate(limit);
    ranked
}

pub fn total_goals(players: &[Player]) -> u64 {
    players.iter().map(|p| u64::from(p.goals)).sum()
}

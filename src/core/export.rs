use crate::core::zones::ZoneRules;
use crate::domain::model::{ScorerRow, StandingRow};
use crate::utils::error::{LeagueError, Result};
use serde::Serialize;
use std::fmt::Write as _;

pub const STANDINGS_HEADER: [&str; 11] = [
    "Pos", "team_id", "team", "P", "W", "D", "L", "GF", "GA", "GD", "PTS",
];

pub const SCORERS_HEADER: [&str; 6] = ["Pos", "player_id", "full_name", "team_name", "goals", "assists"];

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| LeagueError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LeagueError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn standings_csv(rows: &[StandingRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(STANDINGS_HEADER)?;

    for (index, row) in rows.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            row.team_id.to_string(),
            row.team.clone(),
            row.played.to_string(),
            row.won.to_string(),
            row.drawn.to_string(),
            row.lost.to_string(),
            row.goals_for.to_string(),
            row.goals_against.to_string(),
            row.goal_difference.to_string(),
            row.points.to_string(),
        ])?;
    }

    finish_csv(writer)
}

pub fn scorers_csv(rows: &[ScorerRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(SCORERS_HEADER)?;

    for (index, row) in rows.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            row.player_id.to_string(),
            row.full_name.clone(),
            row.team_name.clone().unwrap_or_default(),
            row.goals.to_string(),
            row.assists.to_string(),
        ])?;
    }

    finish_csv(writer)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Fixed-width table with a zone marker after the rank.
pub fn render_standings(rows: &[StandingRow], rules: &ZoneRules) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.team.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}   {:<width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "PTS",
        width = name_width
    );

    let zones = rules.zones_for(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let marker = zones.get(index).map_or(" ", |z| z.marker());
        let _ = writeln!(
            out,
            "{:>3} {} {:<width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            index + 1,
            marker,
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            signed(row.goal_difference),
            row.points,
            width = name_width
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Team;

    fn row(id: i64, name: &str, points: u32, gd: i64) -> StandingRow {
        StandingRow {
            points,
            goal_difference: gd,
            ..StandingRow::new(&Team::new(id, name))
        }
    }

    #[test]
    fn test_standings_csv_has_rank_column() {
        let rows = vec![row(1, "FC Thunder", 23, 14), row(4, "City Wolves", 4, -23)];
        let csv = standings_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Pos,team_id,team,P,W,D,L,GF,GA,GD,PTS");
        assert_eq!(lines[1], "1,1,FC Thunder,0,0,0,0,0,0,14,23");
        assert_eq!(lines[2], "2,4,City Wolves,0,0,0,0,0,0,-23,4");
    }

    #[test]
    fn test_scorers_csv_quotes_names_with_commas() {
        let rows = vec![ScorerRow {
            player_id: 6,
            full_name: "O'Connor, Ryan".to_string(),
            team_name: None,
            goals: 8,
            assists: 9,
        }];
        let csv = scorers_csv(&rows).unwrap();
        assert!(csv.contains("1,6,\"O'Connor, Ryan\",,8,9"));
    }

    #[test]
    fn test_render_standings_signs_goal_difference() {
        let rows = vec![row(1, "FC Thunder", 23, 14), row(2, "Dynamo FC", 9, 0), row(4, "City Wolves", 4, -23)];
        let text = render_standings(&rows, &ZoneRules::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("  1 * FC Thunder"));
        assert!(lines[1].contains("+14"));
        assert!(lines[3].contains("-23"));
    }

    #[test]
    fn test_to_json_uses_table_column_names() {
        let rows = vec![row(1, "FC Thunder", 23, 14)];
        let json = to_json(&rows).unwrap();
        assert!(json.contains("\"PTS\": 23"));
    }
}

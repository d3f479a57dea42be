use crate::utils::error::{LeagueError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type TeamId = i64;
pub type PlayerId = i64;
pub type MatchId = i64;
pub type CompetitionId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium: Option<String>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            coach_name: None,
            founded_year: None,
            stadium: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InPlay,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" | "UPCOMING" => Ok(MatchStatus::Scheduled),
            "IN_PLAY" | "LIVE" => Ok(MatchStatus::InPlay),
            "FINISHED" => Ok(MatchStatus::Finished),
            other => Err(LeagueError::validation(format!(
                "unknown match status '{}'",
                other
            ))),
        }
    }
}

/// Kick-off timestamps arrive either with an offset (`2025-12-10T19:00:00+00:00`)
/// or naive (`2025-12-10T19:00:00`). Offsets are normalised to UTC.
mod kickoff_format {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<NaiveDateTime, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.naive_utc());
        }
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map_err(|e| format!("invalid date_time '{}': {}", raw, e))
    }
}

pub fn parse_kickoff(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    kickoff_format::parse(raw)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[serde(default)]
    pub home_score: i32,
    #[serde(default)]
    pub away_score: i32,
    pub status: MatchStatus,
    #[serde(with = "kickoff_format")]
    pub date_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_id: Option<CompetitionId>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    fn label(&self) -> String {
        format!("match {}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DF")]
    Defender,
    #[serde(rename = "MF")]
    Midfielder,
    #[serde(rename = "FW")]
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Two-letter code, as stored in the data file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Position {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        match Position::ALL.into_iter().find(|p| p.as_str() == code) {
            Some(position) => Ok(position),
            None => Err(LeagueError::validation(format!(
                "unknown position '{}'",
                code
            ))),
        }
    }
}

/// A tournament the matches are played in, e.g. a league or a cup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub min_squad: u32,
    pub max_squad: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub full_name: String,
    pub position: Position,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default)]
    pub appearances: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
}

/// One line of the league table. Rank is the row's position, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub team: String,
    #[serde(rename = "P")]
    pub played: u32,
    #[serde(rename = "W")]
    pub won: u32,
    #[serde(rename = "D")]
    pub drawn: u32,
    #[serde(rename = "L")]
    pub lost: u32,
    #[serde(rename = "GF")]
    pub goals_for: u64,
    #[serde(rename = "GA")]
    pub goals_against: u64,
    #[serde(rename = "GD")]
    pub goal_difference: i64,
    #[serde(rename = "PTS")]
    pub points: u32,
}

impl StandingRow {
    pub fn new(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team: team.name.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerRow {
    pub player_id: PlayerId,
    pub full_name: String,
    pub team_name: Option<String>,
    pub goals: u32,
    pub assists: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub teams: usize,
    pub players: usize,
    pub finished_matches: usize,
    pub live_matches: usize,
    pub total_goals: u64,
}

/// Raw records as handed over by the data store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub competitions: Vec<Competition>,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl LeagueSnapshot {
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn competition(&self, id: CompetitionId) -> Result<&Competition> {
        self.competitions
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| LeagueError::validation(format!("unknown competition {}", id)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueReport {
    pub league: String,
    pub standings: Vec<StandingRow>,
    pub scorers: Vec<ScorerRow>,
    pub summary: DashboardSummary,
}

impl Validate for Team {
    fn validate(&self) -> Result<()> {
        let record = format!("team {}", self.id);
        validation::validate_min_chars(&record, "name", &self.name, 2)?;
        if let Some(year) = self.founded_year {
            validation::validate_range(&record, "founded_year", year, 1800, Utc::now().year())?;
        }
        Ok(())
    }
}

impl Validate for Player {
    fn validate(&self) -> Result<()> {
        let record = format!("player {}", self.id);
        validation::validate_min_chars(&record, "full_name", &self.full_name, 2)?;
        validation::validate_range(&record, "age", self.age, 15, 50)?;
        Ok(())
    }
}

impl Validate for Competition {
    fn validate(&self) -> Result<()> {
        let record = format!("competition {}", self.id);
        validation::validate_min_chars(&record, "name", &self.name, 2)?;
        if self.min_squad > self.max_squad {
            return Err(LeagueError::validation(format!(
                "{}: min_squad {} exceeds max_squad {}",
                record, self.min_squad, self.max_squad
            )));
        }
        Ok(())
    }
}

impl Validate for Match {
    fn validate(&self) -> Result<()> {
        let record = self.label();
        if self.home_team_id == self.away_team_id {
            return Err(LeagueError::validation(format!(
                "{}: home and away team must differ (both {})",
                record, self.home_team_id
            )));
        }
        validation::validate_non_negative(&record, "home_score", self.home_score.into())?;
        validation::validate_non_negative(&record, "away_score", self.away_score.into())?;
        Ok(())
    }
}

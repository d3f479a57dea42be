use crate::config::cli::join_path;
use crate::core::export;
use crate::core::scorers::top_scorers;
use crate::core::standings::StandingsEngine;
use crate::core::{ConfigProvider, LeagueReport, LeagueSnapshot, Pipeline, Storage};
use crate::domain::model::DashboardSummary;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub const STANDINGS_CSV: &str = "standings.csv";
pub const SCORERS_CSV: &str = "scorers.csv";
pub const REPORT_JSON: &str = "report.json";
pub const STANDINGS_TEXT: &str = "standings.txt";

/// Reads a league snapshot from storage, derives the table, scorers and
/// dashboard counters, and writes them back in the configured formats.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    engine: StandingsEngine,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            engine: StandingsEngine::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    async fn write(&self, file: &str, contents: &str) -> Result<()> {
        let path = join_path(self.config.output_path(), file);
        self.storage.write_file(&path, contents.as_bytes()).await?;
        tracing::debug!("Wrote {}", path);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<LeagueSnapshot> {
        tracing::debug!("Reading league snapshot from: {}", self.config.data_path());
        let data = self.storage.read_file(self.config.data_path()).await?;
        let snapshot = LeagueSnapshot::from_json_slice(&data)?;

        // 賽事、球隊與球員資料問題只記錄警告，比賽資料由積分計算嚴格檢查
        for competition in &snapshot.competitions {
            if let Err(e) = competition.validate() {
                tracing::warn!("⚠️ {}", e);
            }
        }
        for team in &snapshot.teams {
            if let Err(e) = team.validate() {
                tracing::warn!("⚠️ {}", e);
            }
        }
        for player in &snapshot.players {
            if let Err(e) = player.validate() {
                tracing::warn!("⚠️ {}", e);
            }
        }

        Ok(snapshot)
    }

    async fn transform(&self, snapshot: LeagueSnapshot) -> Result<LeagueReport> {
        let standings = self.engine.compute(&snapshot.teams, &snapshot.matches)?;
        let scorers = top_scorers(&snapshot.players, self.config.scorers_limit());
        let summary = DashboardSummary::from_snapshot(&snapshot);

        Ok(LeagueReport {
            league: self.config.league_name().to_string(),
            standings,
            scorers,
            summary,
        })
    }

    async fn load(&self, report: LeagueReport) -> Result<String> {
        for format in self.config.output_formats() {
            match format.as_str() {
                "csv" => {
                    self.write(STANDINGS_CSV, &export::standings_csv(&report.standings)?)
                        .await?;
                    self.write(SCORERS_CSV, &export::scorers_csv(&report.scorers)?)
                        .await?;
                }
                "json" => self.write(REPORT_JSON, &export::to_json(&report)?).await?,
                "text" => {
                    let table = export::render_standings(&report.standings, &self.config.zone_rules());
                    self.write(STANDINGS_TEXT, &table).await?;
                }
                other => tracing::warn!("Skipping unsupported output format: {}", other),
            }
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::LeagueConfig;
    use crate::utils::error::LeagueError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                LeagueError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn config(formats: &[&str]) -> LeagueConfig {
        let mut config = LeagueConfig::default();
        config.league.name = "Premier League".to_string();
        config.data.path = "league.json".to_string();
        config.output.path = "out".to_string();
        config.output.formats = formats.iter().map(|f| f.to_string()).collect();
        config
    }

    fn snapshot_json() -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "teams": [
                {"id": 1, "name": "FC Thunder"},
                {"id": 2, "name": "United Stars"},
                {"id": 3, "name": "Royal Eagles"}
            ],
            "players": [
                {"id": 1, "team_id": 1, "team_name": "FC Thunder", "full_name": "Marcus Johnson", "position": "FW", "age": 26, "goals": 18, "assists": 7},
                {"id": 5, "team_id": 2, "team_name": "United Stars", "full_name": "Alex Mueller", "position": "FW", "age": 23, "goals": 14, "assists": 5}
            ],
            "matches": [
                {"id": 1, "home_team_id": 1, "away_team_id": 2, "home_score": 2, "away_score": 1, "date_time": "2025-12-10T19:00:00", "status": "SCHEDULED"},
                {"id": 4, "home_team_id": 2, "away_team_id": 3, "home_score": 0, "away_score": 2, "date_time": "2025-12-05T18:00:00", "status": "FINISHED"}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_extract_and_transform() {
        let storage = MockStorage::with_file("league.json", &snapshot_json());
        let pipeline = ReportPipeline::new(storage, config(&["csv"]));

        let snapshot = pipeline.extract().await.unwrap();
        assert_eq!(snapshot.teams.len(), 3);

        let report = pipeline.transform(snapshot).await.unwrap();
        assert_eq!(report.league, "Premier League");
        assert_eq!(report.standings[0].team, "Royal Eagles");
        assert_eq!(report.standings[0].points, 3);
        assert_eq!(report.scorers[0].full_name, "Marcus Johnson");
        assert_eq!(report.summary.finished_matches, 1);
        assert_eq!(report.summary.total_goals, 32);
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::with_file("league.json", &snapshot_json());
        let pipeline = ReportPipeline::new(storage.clone(), config(&["csv", "json", "text"]));

        let snapshot = pipeline.extract().await.unwrap();
        let report = pipeline.transform(snapshot).await.unwrap();
        let output = pipeline.load(report).await.unwrap();
        assert_eq!(output, "out");

        for file in [STANDINGS_CSV, SCORERS_CSV, REPORT_JSON, STANDINGS_TEXT] {
            let path = join_path("out", file);
            assert!(storage.get_file(&path).await.is_some(), "missing {}", path);
        }

        let json = storage.get_file(&join_path("out", REPORT_JSON)).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["standings"][0]["PTS"], 3);
        assert_eq!(value["summary"]["teams"], 3);
    }

    #[tokio::test]
    async fn test_invalid_match_fails_transform() {
        let data = serde_json::to_vec(&serde_json::json!({
            "teams": [{"id": 1, "name": "FC Thunder"}],
            "matches": [
                {"id": 9, "home_team_id": 1, "away_team_id": 7, "home_score": 1, "away_score": 0, "date_time": "2025-12-10T19:00:00", "status": "FINISHED"}
            ]
        }))
        .unwrap();
        let storage = MockStorage::with_file("league.json", &data);
        let pipeline = ReportPipeline::new(storage, config(&["csv"]));

        let snapshot = pipeline.extract().await.unwrap();
        let err = pipeline.transform(snapshot).await.unwrap_err();
        assert!(matches!(err, LeagueError::ValidationError { .. }));
    }
}

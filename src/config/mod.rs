pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::permissions::{Capability, Role};
#[cfg(feature = "cli")]
use crate::domain::model::{MatchStatus, Position};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::{LeagueConfig, ScorersConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "league-standings")]
#[command(about = "League table, top scorers and reports from a league snapshot")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// League snapshot (JSON with teams, players and matches)
    #[arg(long)]
    pub data: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    /// Output formats for `report`: csv, json, text
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    #[arg(long)]
    pub league: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the league table
    Standings {
        #[arg(long, default_value = "text")]
        format: String,
        /// Only count matches of this competition
        #[arg(long)]
        competition: Option<i64>,
    },
    /// Print the top scorers
    Scorers {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List matches, optionally by status (SCHEDULED, IN_PLAY, FINISHED)
    Fixtures {
        #[arg(long)]
        status: Option<MatchStatus>,
    },
    /// Search players by name, position and team
    Players {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        position: Option<Position>,
        #[arg(long)]
        team: Option<i64>,
    },
    /// Dashboard counters
    Summary,
    /// Check whether a role holds a capability
    Can {
        #[arg(long)]
        role: Role,
        #[arg(long)]
        capability: Capability,
    },
    /// Write standings, scorers and summary in the configured formats
    Report,
}

#[cfg(feature = "cli")]
impl Command {
    /// `can` answers from the role table alone; every other command reads
    /// the league snapshot.
    pub fn reads_snapshot(&self) -> bool {
        !matches!(self, Command::Can { .. })
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML 配置 (若有)，再套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<LeagueConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                LeagueConfig::from_file(path)?
            }
            None => {
                // 沒有配置檔時必須指定資料來源
                if self.command.reads_snapshot() {
                    validation::validate_required_field("data", &self.data)?;
                }
                LeagueConfig::default()
            }
        };

        if let Some(data) = &self.data {
            config.data.path = data.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.output.path = output_path.clone();
        }
        if !self.formats.is_empty() {
            config.output.formats = self.formats.clone();
        }
        if let Some(league) = &self.league {
            config.league.name = league.clone();
        }
        if let Command::Scorers { limit: Some(limit) } = &self.command {
            config.scorers = Some(ScorersConfig { limit: Some(*limit) });
        }

        Ok(config)
    }
}

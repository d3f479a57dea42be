pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::LeagueConfig};

pub use core::{
    engine::ReportEngine,
    permissions::{Capabilities, Capability, Role, Session},
    pipeline::ReportPipeline,
    scorers::{rank_scorers, top_scorers},
    standings::{compute_for_competition, compute_standings, StandingsEngine, TableBuilder},
    zones::{Zone, ZoneRules},
};
pub use domain::model::{Competition, Match, MatchStatus, Player, Position, StandingRow, Team};
pub use utils::error::{LeagueError, Result};

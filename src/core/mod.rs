pub mod engine;
pub mod export;
pub mod fixtures;
pub mod permissions;
pub mod pipeline;
pub mod scorers;
pub mod standings;
pub mod zones;

pub use crate::domain::model::{LeagueReport, LeagueSnapshot};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

use crate::core::zones::ZoneRules;
use crate::domain::model::{LeagueReport, LeagueSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn league_name(&self) -> &str;
    fn data_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn scorers_limit(&self) -> usize;
    fn zone_rules(&self) -> ZoneRules;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<LeagueSnapshot>;
    async fn transform(&self, snapshot: LeagueSnapshot) -> Result<LeagueReport>;
    async fn load(&self, report: LeagueReport) -> Result<String>;
}

use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting league report");

        // Extract
        let snapshot = self.pipeline.extract().await?;
        tracing::info!(
            "📥 Loaded {} teams, {} players, {} matches",
            snapshot.teams.len(),
            snapshot.players.len(),
            snapshot.matches.len()
        );

        // Transform
        let report = self.pipeline.transform(snapshot).await?;
        tracing::info!(
            "📊 Computed table of {} teams and {} top scorers",
            report.standings.len(),
            report.scorers.len()
        );

        // Load
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("📁 Report saved to: {}", output_path);

        Ok(output_path)
    }
}

use clap::Parser;
use league_standings::config::Command;
use league_standings::core::export;
use league_standings::core::fixtures::{filter_by_status, resolve_fixtures, PlayerQuery};
use league_standings::core::{ConfigProvider, Pipeline};
use league_standings::domain::model::DashboardSummary;
use league_standings::utils::{logger, validation::Validate};
use league_standings::{
    rank_scorers, CliConfig, LeagueConfig, LeagueError, LocalStorage, ReportEngine,
    ReportPipeline, Session, StandingsEngine,
};

fn exit_with(e: &LeagueError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

/// 權限查詢不需要讀取聯賽資料
fn check_access(command: &Command) -> Option<league_standings::Result<()>> {
    let Command::Can { role, capability } = command else {
        return None;
    };
    let session = Session::new("cli", *role);
    Some(session.authorize(*capability).map(|()| {
        println!("✅ {} can {}", role, capability);
    }))
}

async fn run(command: &Command, config: LeagueConfig) -> league_standings::Result<()> {
    let pipeline = ReportPipeline::new(LocalStorage::default(), config);

    if let Command::Report = command {
        let engine = ReportEngine::new(pipeline);
        let output_path = engine.run().await?;
        println!("✅ Report written to: {}", output_path);
        return Ok(());
    }

    let snapshot = pipeline.extract().await?;
    let config = pipeline.config();

    match command {
        Command::Standings {
            format,
            competition,
        } => {
            let engine = StandingsEngine::new();
            let table = match competition {
                Some(id) => {
                    let competition = snapshot.competition(*id)?;
                    tracing::info!("🏆 Standings for {}", competition.name);
                    engine.compute_for_competition(&snapshot.teams, &snapshot.matches, *id)?
                }
                None => engine.compute(&snapshot.teams, &snapshot.matches)?,
            };
            let rendered = match format.as_str() {
                "csv" => export::standings_csv(&table)?,
                "json" => export::to_json(&table)?,
                _ => export::render_standings(&table, &config.zone_rules()),
            };
            print!("{}", rendered);
        }
        Command::Scorers { .. } => {
            let mut scorers = rank_scorers(&snapshot.players);
            scorers.truncate(config.scorers_limit());
            for (index, row) in scorers.iter().enumerate() {
                println!(
                    "{:>2}. {:<24} {:<16} {:>3} goals {:>3} assists",
                    index + 1,
                    row.full_name,
                    row.team_name.as_deref().unwrap_or("-"),
                    row.goals,
                    row.assists
                );
            }
        }
        Command::Fixtures { status } => {
            let selected: Vec<_> = filter_by_status(&snapshot.matches, *status)
                .into_iter()
                .cloned()
                .collect();
            for fixture in resolve_fixtures(&snapshot.teams, &selected)? {
                println!(
                    "{}  {:<9} {}",
                    fixture.fixture.date_time.format("%Y-%m-%d %H:%M"),
                    fixture.fixture.status,
                    fixture.scoreline()
                );
            }
        }
        Command::Players {
            search,
            position,
            team,
        } => {
            let query = PlayerQuery {
                search: search.clone(),
                position: *position,
                team_id: *team,
            };
            for player in query.apply(&snapshot.players) {
                println!(
                    "{:<24} {:<2} age {:>2}  {:>3} goals {:>3} assists",
                    player.full_name, player.position, player.age, player.goals, player.assists
                );
            }
        }
        Command::Summary => {
            let summary = DashboardSummary::from_snapshot(&snapshot);
            println!("{}", export::to_json(&summary)?);
        }
        Command::Report | Command::Can { .. } => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting league-standings CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Some(result) = check_access(&cli.command) {
        if let Err(e) = result {
            exit_with(&e);
        }
        return Ok(());
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(&cli.command, config).await {
        exit_with(&e);
    }

    Ok(())
}

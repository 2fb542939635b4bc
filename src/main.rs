use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use configuration::Config;
use database::connection::{connect, run_migrations, PoolSettings};
use database::repository::DbRepository;
use indicatif::{ProgressBar, ProgressStyle};

/// The main entry point for the Crease cricket statistics service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = configuration::load_config()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => web_server::run_server(config).await,
        Commands::RecomputeStats { season } => {
            let db_repo = open_repository(&config).await?;
            handle_recompute(&db_repo, season).await
        }
        Commands::Standings { season } => {
            let db_repo = open_repository(&config).await?;
            handle_standings(&db_repo, season).await
        }
    }
}

/// IPL cricket database: HTTP API, standings recompute, terminal reports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve,
    /// Recompute season standings and store them in team_stats.
    RecomputeStats {
        /// Season year to recompute; every season when omitted.
        #[arg(long)]
        season: Option<i32>,
    },
    /// Print the points table for a season.
    Standings {
        /// Season year, e.g. 2023.
        #[arg(long)]
        season: i32,
    },
}

async fn open_repository(config: &Config) -> anyhow::Result<DbRepository> {
    let db_pool = connect(PoolSettings {
        max_connections: config.database.max_connections,
        acquire_timeout_secs: config.database.acquire_timeout_secs,
    })
    .await?;
    run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

// ==============================================================================
// Recompute Command Logic
// ==============================================================================

/// Recomputes one season's standings from the base tables and upserts the
/// `team_stats` rows. Returns (teams in the table, rows written).
async fn recompute_season(db_repo: &DbRepository, year: i32) -> anyhow::Result<(usize, u64)> {
    let series_id = db_repo.series_id_for_season(year).await?;
    let (totals_res, teams_res) = tokio::join!(
        db_repo.season_match_totals(series_id),
        db_repo.team_names_for_series(series_id),
    );
    let table = stats::compute_standings(&totals_res?, &teams_res?)?;
    let written = db_repo.upsert_team_stats(series_id, &table).await?;
    Ok((table.len(), written))
}

async fn handle_recompute(db_repo: &DbRepository, season: Option<i32>) -> anyhow::Result<()> {
    let years: Vec<i32> = match season {
        Some(year) => vec![year],
        None => db_repo
            .list_series()
            .await?
            .into_iter()
            .map(|s| s.season_year)
            .collect(),
    };

    let progress_bar = ProgressBar::new(years.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for year in years {
        progress_bar.set_message(format!("Recomputing {}...", year));
        let (teams, written) = recompute_season(db_repo, year).await?;
        tracing::info!(season_year = year, teams, rows_upserted = written, "Season recomputed.");
        progress_bar.inc(1);
    }
    progress_bar.finish_with_message("Recompute complete!");

    Ok(())
}

// ==============================================================================
// Standings Command Logic
// ==============================================================================

async fn handle_standings(db_repo: &DbRepository, season: i32) -> anyhow::Result<()> {
    let series = db_repo.get_series_by_year(season).await?;
    let (totals_res, teams_res) = tokio::join!(
        db_repo.season_match_totals(series.id),
        db_repo.team_names_for_series(series.id),
    );
    let standings = stats::compute_standings(&totals_res?, &teams_res?)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Team", "P", "W", "L", "NR", "Pts", "NRR"]);
    for (rank, row) in standings.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&row.team_name),
            Cell::new(row.matches_played),
            Cell::new(row.matches_won),
            Cell::new(row.matches_lost),
            Cell::new(row.no_results),
            Cell::new(row.points),
            Cell::new(row.net_run_rate),
        ]);
    }

    println!("Points table for {} (season {}):", series.name, season);
    println!("{table}");

    // The table above is always freshly derived; flag when the materialized
    // team_stats copy has fallen behind it.
    let stored = db_repo.get_team_stats(series.id).await?;
    if !stats::stored_standings_current(&stored, &standings) {
        println!(
            "Stored team_stats rows are out of date; run `crease recompute-stats --season {}`.",
            season
        );
    }
    Ok(())
}

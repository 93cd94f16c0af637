//! Covid Dash CLI
//!
//! Entry point: interactive dashboard by default, plus non-interactive
//! subcommands for scripting (summary, state list, per-state breakdown).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use covid_dash::config::{generate_default_config, Config};
use covid_dash::feed::{FeedConfig, FetchPipeline, StatsClient};
use covid_dash::store::{DashboardSnapshot, FetchStatus, SnapshotStore};

#[derive(Parser)]
#[command(name = "covid-dash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "India COVID-19 statistics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (default: standard config locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the statistics endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format for non-interactive commands (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard,

    /// Print the nationwide summary
    Summary,

    /// Print per-state statistics
    States,

    /// Print the breakdown for a single state
    State {
        /// State name, exactly as published by the endpoint
        name: String,
    },

    /// Print a default config file to stdout
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.feed.endpoint = endpoint.clone();
    }

    init_logging(&config);

    let client = StatsClient::new(FeedConfig {
        endpoint: config.feed.endpoint.clone(),
        request_timeout_ms: config.feed.request_timeout_ms,
    });
    let store = Arc::new(SnapshotStore::new());
    let pipeline = Arc::new(FetchPipeline::new(Arc::new(client), store));

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => covid_dash::ui::run(&config, pipeline).await,
        Commands::Summary => {
            let snapshot = fetch_or_bail(&pipeline).await?;
            print_summary(&snapshot, &cli.format)
        }
        Commands::States => {
            let snapshot = fetch_or_bail(&pipeline).await?;
            print_states(&snapshot, &cli.format)
        }
        Commands::State { name } => {
            let snapshot = fetch_or_bail(&pipeline).await?;
            print_state(&snapshot, &name, &cli.format)
        }
        Commands::InitConfig => {
            print!("{}", generate_default_config());
            Ok(())
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("covid_dash={}", config.logging.level)),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// One-shot fetch for the non-interactive commands. The pipeline never
/// errors; here a failed status is fatal because there is nothing to render.
async fn fetch_or_bail(pipeline: &FetchPipeline) -> anyhow::Result<DashboardSnapshot> {
    let snapshot = pipeline.refresh().await;
    if snapshot.status != FetchStatus::Succeeded {
        anyhow::bail!("failed to fetch statistics; see logs for details");
    }
    Ok(snapshot)
}

fn print_summary(snapshot: &DashboardSnapshot, format: &str) -> anyhow::Result<()> {
    if format == "json" {
        let out = serde_json::json!({
            "total_cases": snapshot.total_cases,
            "recovered": snapshot.recovered,
            "deaths": snapshot.deaths,
            "active": snapshot.active(),
            "last_updated": snapshot.last_updated,
        });
        println!("{}", serde_json::to_string_pretty(&out).context("serialize summary")?);
    } else {
        println!("Total Cases: {}", snapshot.total_cases);
        println!("Recovered:   {}", snapshot.recovered);
        println!("Deaths:      {}", snapshot.deaths);
        println!("Active:      {}", snapshot.active());
        if let Some(ts) = snapshot.last_updated {
            println!("Updated:     {}", ts.format("%Y-%m-%d %H:%M UTC"));
        }
    }
    Ok(())
}

fn print_states(snapshot: &DashboardSnapshot, format: &str) -> anyhow::Result<()> {
    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot.statewise).context("serialize states")?
        );
    } else {
        println!("{:<30} {:>10} {:>10} {:>8}", "State", "Total", "Recovered", "Deaths");
        for entry in &snapshot.statewise {
            println!(
                "{:<30} {:>10} {:>10} {:>8}",
                entry.state, entry.total, entry.recovered, entry.deaths
            );
        }
    }
    Ok(())
}

fn print_state(snapshot: &DashboardSnapshot, name: &str, format: &str) -> anyhow::Result<()> {
    let Some(entry) = snapshot.find_state(name) else {
        anyhow::bail!("no data available for {name}");
    };

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(entry).context("serialize state")?
        );
    } else {
        println!("State:     {}", entry.state);
        println!("Total:     {}", entry.total);
        println!("Recovered: {}", entry.recovered);
        println!("Deaths:    {}", entry.deaths);
        println!("Active:    {}", entry.active());
    }
    Ok(())
}

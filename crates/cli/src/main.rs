use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use jury_client::{ApiClient, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod display;

use commands::admin::AdminCommand;
use config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "jury")]
#[command(about = "Moot court jury portal: rounds, oral marks and round administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    overrides: Overrides,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the oral-round scoring rubric
    Rubric,
    /// List the rounds assigned to the juror
    Rounds {
        /// Only rounds scheduled on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show one round and whether marks can be entered
    Round { round_id: i64 },
    /// Score both teams of a round from JSON sheets and submit
    Marks {
        round_id: i64,

        #[arg(long)]
        team1: PathBuf,

        #[arg(long)]
        team2: PathBuf,

        /// Apply the sheets and print totals without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Round administration
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "jury={},jury_client={},scoring={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Rubric = cli.command {
        commands::rubric::run();
        return Ok(());
    }

    let config = Config::from_env(&cli.overrides)?;
    let session: Session = config.session();
    let client = ApiClient::new(config.client_config(), session.clone())
        .context("Cannot create API client")?;

    match cli.command {
        Commands::Rubric => {}
        Commands::Rounds { date } => commands::rounds::list(&client, date).await?,
        Commands::Round { round_id } => {
            commands::rounds::show(&client, &session, round_id).await?
        }
        Commands::Marks {
            round_id,
            team1,
            team2,
            dry_run,
        } => commands::marks::run(&client, &session, round_id, &team1, &team2, dry_run).await?,
        Commands::Admin { command } => commands::admin::run(&client, command).await?,
    }

    Ok(())
}

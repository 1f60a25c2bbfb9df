use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cleanabag_core::Credentials;

mod commands;

#[derive(Parser)]
#[command(name = "cleanabag")]
#[command(version, about = "Tidy up old articles on a self-hosted wallabag instance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the credentials file (default: ~/.config/cleanABag/credentials.json)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete old articles from the instance (dry run unless --delete is set)
    Prune {
        /// Articles older than this date will be removed if they match the
        /// archived/starred flags, format "YYYY-MM-DD"
        #[arg(short = 'd', long)]
        date: String,
        /// Include unread entries for deletion. Without this flag unread
        /// articles are kept
        #[arg(short = 'u', long)]
        unread: bool,
        /// Include starred entries for deletion. Without this flag starred
        /// articles are kept
        #[arg(short = 's', long)]
        starred: bool,
        /// Delete articles. Without this flag, it will only do a dry run
        #[arg(long)]
        delete: bool,
    },
    /// Show entry counts for the instance
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load credentials
    let credentials = Credentials::load(cli.config.as_deref())?;

    // Handle commands
    match cli.command {
        Commands::Prune {
            date,
            unread,
            starred,
            delete,
        } => commands::prune::run(&credentials, &date, unread, starred, delete).await,
        Commands::Stats => commands::stats::run(&credentials).await,
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ewgf_stats::api::{build_router, state::AppState};
use ewgf_stats::config::AppConfig;
use ewgf_stats::service::PlayerService;
use ewgf_stats::storage::{JsonlStore, StorageConfig};

#[derive(Parser)]
#[command(name = "ewgf-stats")]
#[command(about = "Season-aware player statistics for a fighting game stat tracker")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Listen address, e.g. 0.0.0.0:8080
        #[arg(long)]
        listen: Option<SocketAddr>,
    },

    /// Print full statistics for a player
    Player {
        /// Polaris id of the player
        polaris_id: String,
    },

    /// Print profile metadata for a player
    Metadata {
        /// Polaris id of the player
        polaris_id: String,
    },

    /// Print the padded primary id for a Polaris id
    PlayerId {
        /// Polaris id of the player
        polaris_id: String,
    },

    /// Search players by name or Polaris id
    Search {
        /// Case-insensitive substring to match
        query: String,
    },

    /// List players active within the configured window
    Recent,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting ewgf-stats v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(
        JsonlStore::open(StorageConfig::new(config.data_dir.clone()))
            .with_context(|| format!("Failed to open data dir {}", config.data_dir.display()))?,
    );
    let service = PlayerService::new(store.clone(), store, config.stats.clone());

    match cli.command {
        Commands::Serve { listen } => {
            let addr = listen.unwrap_or(config.server.listen);
            let app = build_router(
                AppState::new(service),
                config.server.cors_origin.as_deref(),
            );

            tracing::info!("Listening on http://{}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Commands::Player { polaris_id } => {
            print_json(&service.get_player_stats(&polaris_id).await?)?;
        }
        Commands::Metadata { polaris_id } => {
            print_json(&service.get_player_metadata(&polaris_id).await?)?;
        }
        Commands::PlayerId { polaris_id } => {
            print_json(&service.get_player_id(&polaris_id).await?)?;
        }
        Commands::Search { query } => {
            print_json(&service.search_players(&query).await?)?;
        }
        Commands::Recent => {
            print_json(&service.get_recently_active_players().await?)?;
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let (plain, json) = if json {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

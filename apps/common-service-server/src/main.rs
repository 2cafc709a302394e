mod config;
mod logging;
mod signals;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common_service::{CommonServiceConfig, CommonServiceModule};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, ConnectionTrait, Database};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Name of the module section under `modules:` in the config file.
const MODULE_NAME: &str = "common_service";

/// Common Service Server - generic query facade over a relational store
#[derive(Parser)]
#[command(name = "common-service-server")]
#[command(about = "Common Service Server - generic query facade over a relational store")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.config.as_deref()
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // defaults -> YAML -> env (APP__*) -> CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose)?;

    logging::init_logging(&config.logging)?;
    tracing::info!("Common Service Server starting");

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn module_config(config: &AppConfig) -> Result<CommonServiceConfig> {
    CommonServiceConfig::from_section(config.module_config(MODULE_NAME))
        .with_context(|| format!("invalid config for module '{MODULE_NAME}'"))
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.bind_addr()?;
    module_config(config)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let module_cfg = module_config(&config)?;

    let mut options = ConnectOptions::new(config.database.dsn.clone());
    options
        .max_connections(config.database.max_conns)
        .acquire_timeout(config.database.acquire_timeout)
        .sqlx_logging(config.database.sqlx_logging);
    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;
    tracing::info!(backend = ?db.get_database_backend(), "Database connected");

    let module = CommonServiceModule::init(db, module_cfg);
    let app = module
        .register_rest(axum::Router::new())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signals::wait_for_shutdown().await {
                tracing::error!(error = %e, "Signal handling failed, shutting down");
            }
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Common Service Server stopped");
    Ok(())
}

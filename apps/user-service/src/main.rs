use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use serde_json::{json, Value};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use runtime::{AppConfig, CliArgs};
use users::config::UsersConfig;
use users::contract::model::NewUser;
use users::domain::registry::UserRegistry;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// User Service - user directory microservice
#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User Service - user directory microservice")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(
        &logging_config,
        std::path::Path::new(&config.server.home_dir),
    );
    tracing::info!("User Service starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing user registry...");

    let registry = Arc::new(UserRegistry::new());
    seed_registry(&registry, &config)?;

    let mut router = Router::new().route("/healthz", get(health_check));
    router = users::api::rest::routes::register_routes(router, registry);
    let mut router = router.layer(TraceLayer::new_for_http());
    if config.server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout_sec,
        )));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("User Service listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = runtime::shutdown::wait_for_shutdown().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("User Service stopped");
    Ok(())
}

/// Insert configured seed users through the normal create path.
fn seed_registry(registry: &UserRegistry, config: &AppConfig) -> Result<()> {
    let users_config: UsersConfig = config.module_config("users").unwrap_or_default();

    for seed in &users_config.seed_users {
        let user = registry
            .create_user(NewUser {
                username: seed.username.clone(),
                email: seed.email.clone(),
            })
            .with_context(|| format!("Invalid seed user '{}'", seed.username))?;
        tracing::info!("Seeded user {} ({})", user.id, user.username);
    }

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // AppConfig::load_* already normalized & created home_dir
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

//! Site health hooks server entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use site_health_hooks::api::{create_router, AppState};
use site_health_hooks::config::Config;
use site_health_hooks::metrics;
use site_health_hooks::utils::shutdown_signal;

/// Deploy webhook and test form validator endpoints.
#[derive(Parser, Debug)]
#[command(name = "site-health-hooks")]
#[command(about = "Deploy-notification webhook and test-form validator endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the HTTP server port.
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the endpoints (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("site_health_hooks=debug,deploy=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration is needed before logging so RUST_LOG / LOG_JSON apply
    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SITE HEALTH HOOKS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Site ID: {}", config.site_id);
    println!("  Site Name: {}", config.site_name);
    println!("  Environment: {}", config.environment);
    println!("  Listen: {}:{}", config.host, config.port);
    println!("  Log Level: {}", config.rust_log);
    println!("  JSON Logs: {}", config.log_json);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the hook endpoints until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    let addr = config.socket_addr().map_err(|e| anyhow::anyhow!(e))?;

    let handle = metrics::install_recorder()?;
    let state = AppState::new(config.clone()).with_metrics(handle);

    info!(
        site_id = %config.site_id,
        site_name = %config.site_name,
        environment = %config.environment,
        "Starting site health hooks"
    );

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

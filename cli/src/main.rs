//! IMAS transit backend CLI server
//!
//! Headless REST + WebSocket backend suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/transit-service/config.toml)
//! transit-cli
//!
//! # Custom config path
//! transit-cli --config /etc/transit-service/config.toml
//!
//! # Override the API port
//! transit-cli --api-port 8080
//!
//! # Validate config without starting
//! transit-cli --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use imas_transit::config::AppConfig;
use imas_transit::server::{init_tracing, ServerHandle, ServerOptions};

/// IMAS transit backend for municipal bus operations.
#[derive(Parser, Debug)]
#[command(
    name = "transit-cli",
    version,
    about = "REST backend for municipal bus ticketing, fleet and maintenance",
    long_about = "IMAS transit backend: REST API, WebSocket event streams and \
                  housekeeping jobs for a municipal bus network.\n\n\
                  Default config: ~/.config/transit-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "TRANSIT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin account.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(imas_transit::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // The log level override has to land before tracing is initialised
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Prediction  : {}", config.prediction.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

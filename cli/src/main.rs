//! Users service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/users-service/config.toml)
//! users-service
//!
//! # Custom config path
//! users-service --config /etc/users-service/config.toml
//!
//! # Override the port
//! users-service --port 8080
//!
//! # Validate config without starting
//! users-service --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use users_api::config::AppConfig;
use users_api::server::{init_tracing, ServerHandle, ServerOptions};

/// Users service, HTTP CRUD over a single users table.
#[derive(Parser, Debug)]
#[command(
    name = "users-service",
    version,
    about = "HTTP CRUD service for users with bcrypt password storage",
    long_about = "REST API exposing create / fetch / list / update / delete over a users table.\n\n\
                  Default config: ~/.config/users-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "USERS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Do not create the users table on startup.
    #[arg(long)]
    no_schema: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(users_api::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Tracing is not up yet without a config; use the defaults for it
            init_tracing(&AppConfig::default().logging);
            error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);
    info!("Configuration loaded from {}", config_path.display());

    if cli.check {
        return match config.validate() {
            Ok(()) => {
                info!("Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let opts = ServerOptions {
        config,
        ensure_schema: !cli.no_schema,
    };

    let handle = match ServerHandle::start(opts).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");
    handle.wait().await;

    ExitCode::SUCCESS
}

//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! metrics recorder, connection pool, schema bootstrap, dependency wiring,
//! the REST API listener, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{SharedPasswordHasher, UserService};
use crate::config::{AppConfig, LoggingConfig};
use crate::domain::EmailDomainPolicy;
use crate::infrastructure::crypto::BcryptHasher;
use crate::infrastructure::database::repositories::UserRepository;
use crate::infrastructure::database::{ensure_schema, init_database, DatabaseConfig};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Create the `users` table on startup if missing. Combined with
    /// `database.ensure_schema`; both must be on.
    pub ensure_schema: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            ensure_schema: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// ```rust,no_run
/// use users_api::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder (once per process)
    /// 2. Open the connection pool and ensure the schema (if enabled)
    /// 3. Build the password hasher, email policy, repository and service
    /// 4. Bind the REST API listener and start serving
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting users service...");

        let prometheus_handle = prometheus_handle()?;

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await?;

        if opts.ensure_schema && app_cfg.database.ensure_schema {
            ensure_schema(&db).await?;
        }

        // ── Services ───────────────────────────────────────────
        let hasher: SharedPasswordHasher = Arc::new(BcryptHasher::new(app_cfg.security.bcrypt_cost));
        let email_policy = EmailDomainPolicy::new(&app_cfg.users.allowed_email_domain);
        info!(
            bcrypt_cost = app_cfg.security.bcrypt_cost,
            domain = email_policy.domain(),
            expose_password_hash = app_cfg.users.expose_password_hash,
            "User service configured"
        );

        let user_service = Arc::new(UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            hasher,
            email_policy,
        ));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(user_service, db.clone(), &app_cfg, prometheus_handle);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started.");

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, then close the connection pool.
    ///
    /// Once shutdown has been triggered, in-flight requests get
    /// `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;

        let signal = shutdown.signal();
        let finished = tokio::select! {
            result = &mut api_task => {
                log_api_exit(result);
                true
            }
            _ = signal.wait() => false,
        };

        if !finished {
            info!(
                "⏳ Draining in-flight requests (timeout: {}s)...",
                shutdown.timeout().as_secs()
            );
            let drained = tokio::time::timeout(shutdown.timeout(), &mut api_task).await;
            match drained {
                Ok(result) => log_api_exit(result),
                Err(_) => {
                    warn!("⚠️ Graceful shutdown timed out; aborting server task");
                    api_task.abort();
                }
            }
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Users service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down users service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn log_api_exit(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

/// The global metrics recorder can only be installed once per process; a
/// restart within the same process reuses it.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Initialise the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let result = match config.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if result.is_err() {
        warn!("Tracing subscriber already initialised");
    }
}

//!
//! Restaurant reservation backend.
//! Reads configuration from TOML file (~/.config/agp-reserve/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use agp_reserve::application::booking::{AvailabilityService, BookingService};
use agp_reserve::application::payments::PaymentService;
use agp_reserve::application::ports::{Notifier, PaymentGateway};
use agp_reserve::application::start_cleanup_task;
use agp_reserve::domain::RepositoryProvider;
use agp_reserve::infrastructure::database::migrator::Migrator;
use agp_reserve::infrastructure::gateway::ToyyibPayGateway;
use agp_reserve::infrastructure::notifier::WebhookNotifier;
use agp_reserve::shared::shutdown::ShutdownCoordinator;
use agp_reserve::{
    create_api_router, default_config_path, init_database, AppConfig, AppContext, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("RESERVE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting reservation service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories and services ──────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let gateway: Arc<dyn PaymentGateway> = Arc::new(ToyyibPayGateway::new(
        app_cfg.gateway.clone().with_env_overrides(),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(WebhookNotifier::new(&app_cfg.notifications));

    let booking = Arc::new(BookingService::new(
        db.clone(),
        repos.clone(),
        gateway.clone(),
    ));
    let payments = Arc::new(PaymentService::new(
        repos.clone(),
        notifier.clone(),
        app_cfg.notifications.reminder_hour,
    ));
    let availability = Arc::new(AvailabilityService::new(db.clone(), repos.clone()));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    // ── Background sweep for abandoned PENDING orders ──────────
    start_cleanup_task(
        repos.clone(),
        shutdown_signal.clone(),
        app_cfg.cleanup.interval_secs,
        app_cfg.cleanup.pending_ttl_minutes,
    );

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(AppContext {
        repos,
        booking,
        payments,
        availability,
        prometheus: prometheus_handle,
    });

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // ── Final cleanup ──────────────────────────────────────────
    info!("Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Reservation service shutdown complete");
    Ok(())
}

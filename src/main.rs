//!
//! VENU restaurant discovery and reservation server.
//! Reads configuration from TOML file (~/.config/venu/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use venu::application::services::{ConciergeService, ReservationService, RestaurantContextCache};
use venu::application::ports::ConciergeModel;
use venu::auth::JwtConfig;
use venu::config::AppConfig;
use venu::infrastructure::ai::{GeminiClient, GeminiConfig};
use venu::infrastructure::database::migrator::Migrator;
use venu::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("VENU_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
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

    info!("Starting VENU server...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "venu-service".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
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

    // Initialize repository provider
    let repos: Arc<dyn venu::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Initialize services
    let reservations = Arc::new(ReservationService::new(repos.clone()));
    let context = Arc::new(RestaurantContextCache::new(repos.clone()));

    // The concierge runs degraded without a model: every ask gets the
    // fallback line, everything else keeps working.
    let model: Option<Arc<dyn ConciergeModel>> = match app_cfg.ai.gemini_api_key.clone() {
        Some(api_key) => {
            let gemini_config = GeminiConfig {
                api_key,
                model: app_cfg.ai.model.clone(),
                base_url: app_cfg.ai.base_url.clone(),
            };
            match GeminiClient::new(gemini_config) {
                Ok(client) => {
                    info!("Concierge model configured: {}", app_cfg.ai.model);
                    Some(Arc::new(client))
                }
                Err(e) => {
                    error!("Failed to build the model client: {}", e);
                    None
                }
            }
        }
        None => {
            warn!("No Gemini API key configured; the concierge will run degraded");
            None
        }
    };

    let concierge = Arc::new(ConciergeService::new(
        repos.clone(),
        reservations.clone(),
        context.clone(),
        model,
    ));

    // Warm the catalog summary so the first ask skips the build
    if let Err(e) = context.refresh().await {
        warn!("Failed to warm the restaurant context: {}", e);
    }

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(repos, jwt_config, reservations, context, concierge);

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Performing final cleanup...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("VENU server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

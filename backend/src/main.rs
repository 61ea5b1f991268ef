//! AdaFit Backend
//!
//! Local JSON service for the AdaFit coaching app: daily workout and diet
//! recommendations, the persisted profile and the coach chat.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and routing
//! - Services: recommendation, nutrition, chat and the remote agent client
//! - Store: key-value persistence (in-memory or `<key>.json` files)

use adafit_backend::{config, routes, state::AppState};
use anyhow::Result;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        agent_enabled = config.agent.enabled,
        "Starting AdaFit Backend"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let state = AppState::from_config(config.clone())?;

    if let Some(agent) = state.agent() {
        if let Err(e) = agent.health().await {
            warn!(base_url = %agent.base_url(), error = %e, "Coaching agent not reachable yet");
        }
    }

    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "adafit_backend=info,tower_http=info".into()
        } else {
            "adafit_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.storage.data_dir.is_none() {
        errors.push("storage.data_dir must be set; in-memory storage loses data on restart");
    }
    if config.storage.profile_key == config.storage.session_key {
        errors.push("storage.profile_key and storage.session_key must differ");
    }

    if config.agent.enabled && config.agent.base_url.contains("localhost") {
        warn!("Agent URL points at localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

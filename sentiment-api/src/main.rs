//! Sentiment Analysis API Server
//!
//! Loads the model artifact once, then serves predictions.
//! A missing or invalid artifact aborts startup.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentiment_api::{create_router, AppState, Config};
use sentiment_core::logic::model::{artifact, PredictionService};
use sentiment_core::logic::telemetry::PredictionLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "sentiment_api=debug,sentiment_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("Sentiment Analysis API starting ({})...", config.environment);
    tracing::info!("Model artifact: {}", config.model_path.display());

    // Refuse to serve without a valid model
    let model = artifact::load(&config.model_path)
        .with_context(|| format!("cannot start without model artifact {}", config.model_path.display()))?;

    let service = PredictionService::new();
    service.initialize(model)?;

    let logger = PredictionLogger::new(&config.log_dir)
        .with_context(|| format!("cannot open prediction log dir {}", config.log_dir.display()))?;

    // Build application state
    let state = AppState {
        service: Arc::new(service),
        sink: Arc::new(logger),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

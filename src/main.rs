use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wa_check_api::config::Config;
use wa_check_api::handlers::{self, AppState};
use wa_check_api::session::WaBridgeClient;

/// Main entry point for the application.
///
/// Initializes logging and configuration, constructs the bridge client, and
/// starts the Axum server with tracing, CORS, and a request body limit.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wa_check_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the WhatsApp bridge client; the bridge owns the session
    // lifecycle (QR exchange, reconnects), this service only observes it.
    let session = WaBridgeClient::new(config.bridge_base_url.clone(), config.bridge_token.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize bridge client: {}", e))?;
    tracing::info!("✓ WhatsApp bridge client initialized: {}", config.bridge_base_url);

    // Build application state
    let app_state = Arc::new(AppState {
        config: config.clone(),
        session: Arc::new(session),
    });

    let app = handlers::app(app_state)
        .layer(
            ServiceBuilder::new()
                // Request size limit: 1MB is plenty for a phone-number payload
                .layer(RequestBodyLimitLayer::new(1024 * 1024)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

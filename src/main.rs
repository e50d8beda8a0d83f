use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use talent_insight::{
    config::{get_config, init_config},
    middleware::cors::dashboard_cors,
    routes::{api_router, MAX_UPLOAD_REQUEST_BYTES},
    AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("talent_insight=info,tower_http=info")),
        )
        .init();

    init_config()?;
    let config = get_config()?;
    info!(
        model = %config.gemini_model,
        language = %config.output_language,
        ai_rps = config.ai_rps,
        "Configuration loaded"
    );

    let app_state = AppState::new(config)?;

    let app = api_router(config.ai_rps)
        .with_state(app_state)
        .layer(dashboard_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_REQUEST_BYTES));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

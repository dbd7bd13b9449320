use anyhow::Result;
use axum_extra::extract::cookie::Key;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
use config::{init_router, Settings};

mod errors;

mod handlers;

mod oauth;

mod services;
use services::GraphClient;

mod state;
use state::AppState;

mod views;
use views::HtmlRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meta_oauth_relay=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // Graph API client with the configured request timeout
    let graph = GraphClient::from_settings(&settings)?;

    // Key for the encrypted state cookie
    let key = match &settings.server.cookie_key {
        Some(cookie_key) => Key::from(cookie_key.as_bytes()),
        None => {
            warn!("COOKIE_KEY not set, generating a key for this process only");
            Key::generate()
        }
    };

    // Build app state
    let state = AppState {
        config: Arc::new(settings.oauth.clone()),
        graph,
        views: Arc::new(HtmlRenderer),
        key,
    };

    // Build router
    let app = init_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running on http://localhost:{}", settings.server.port);
    info!("OAuth endpoints:");
    info!("  - Authorize: http://localhost:{}/api/auth", settings.server.port);
    info!("  - Callback:  {}", settings.oauth.redirect_uri);

    axum::serve(listener, app).await?;

    Ok(())
}

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{authorize, callback, health_check, homepage, token_info};
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    // OAuth routes
    let api_router = Router::new()
        .route("/auth", get(authorize))
        .route("/callback", get(callback))
        .route("/token/:token", get(token_info));

    Router::new()
        .route("/", get(homepage))
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! Axum router configuration with middleware.
//!
//! `/ws` is the chat socket, control-plane routes live under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/channels", get(handlers::channel::list_channels))
        .route(
            "/channels/{name}/members",
            get(handlers::channel::list_members),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness plus the open store and live socket count.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": state.store.kind(),
        "connections": state.gateway.len(),
    }))
}

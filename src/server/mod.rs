//! Hospital search backend: proxies the discover API and serves the
//! embedded frontend.

mod handlers;
mod state;
mod static_files;

use axum::routing::{get, post};
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::poi::DiscoverClient;

pub fn build_router(discover: DiscoverClient) -> Router {
    let state = Arc::new(AppState { discover });

    Router::new()
        .route("/", get(handlers::index))
        .route("/app.js", get(handlers::script))
        .route("/api/search_hospitals", post(handlers::search_hospitals))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, discover: DiscoverClient) {
    let app = build_router(discover);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  MediMap server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}

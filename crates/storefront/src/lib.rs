//! Threadline Storefront library.
//!
//! This crate provides the storefront as a library so the router can be
//! exercised in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod stores;
pub mod views;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::SessionMemoryStore;
use crate::state::AppState;

/// Build the application router with a fresh session store.
///
/// Rate limiting and Sentry layers are added by the binary, since they depend
/// on the connection info and global client only a real server has.
pub fn app(state: AppState) -> Router {
    app_with_session_store(state, SessionMemoryStore::default())
}

/// Build the application router around an existing session store.
///
/// The binary keeps a handle on the store to sweep expired sessions.
pub fn app_with_session_store(state: AppState, store: SessionMemoryStore) -> Router {
    let session_layer = middleware::create_session_layer(state.config(), store);
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .fallback(routes::pages::not_found)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The storefront has no external
/// dependencies, so there is no separate readiness check.
async fn health() -> &'static str {
    "ok"
}

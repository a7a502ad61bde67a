//! Changelog Backend
//!
//! In-memory changelog service: public month-grouped timeline, emoji reactions,
//! and admin create/edit/delete behind a pre-shared key.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod notice;
pub mod store;
pub mod timeline;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use store::EntryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntryStore>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // Public reads and reactions
    let public_routes = Router::new()
        .route("/entries", get(api::list_entries))
        .route("/entries/{id}", get(api::get_entry))
        .route("/entries/{id}/reactions", post(api::add_reaction))
        .route("/timeline", get(api::get_timeline))
        .route("/revision", get(api::get_revision));

    // Admin mutations behind the key gate
    let admin_routes = Router::new()
        .route("/entries", post(api::create_entry))
        .route("/entries/{id}", put(api::update_entry).delete(api::delete_entry))
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_key_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

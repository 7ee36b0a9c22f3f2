//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Bearer authentication middleware
//! - Success/failure envelope responses

pub mod middleware;
pub mod response;
pub mod routes;

use axum::Router;
use axum::http::header::AUTHORIZATION;
use infotrack_core::DashboardService;
use infotrack_shared::{JwtService, NonceService};
use std::iter::once;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dashboard refresh service.
    pub dashboard: Arc<DashboardService>,
    /// JWT service for bearer tokens.
    pub jwt_service: Arc<JwtService>,
    /// Nonce service for anti-forgery tokens.
    pub nonce_service: Arc<NonceService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new(once(AUTHORIZATION)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

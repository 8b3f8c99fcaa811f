//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Health check (public)
//! - `/api/v1/*`      - REST API (Bearer JWT required)
//!
//! Unmatched paths and methods are answered with the JSON error envelope.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the API (optional)
//! - **Authentication** - Bearer JWT on matched API routes

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, method_not_allowed_handler, not_found_handler};
use crate::api::middleware::rate_limit::{self, RateLimitSettings};
use crate::api::middleware::{auth, tracing};
use crate::api::routes::API_PREFIX;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limits for the API; `None` disables limiting.
///   When enabled the router must be served with connect info unless
///   `behind_proxy` is set.
///
/// The result is returned unwrapped so tests can drive it directly; wrap it
/// with [`with_normalized_path`] before serving.
///
/// # Errors
///
/// Returns an error if the rate limit settings are rejected.
pub fn app_router(state: AppState, rate_limit: Option<RateLimitSettings>) -> Result<Router> {
    let mut api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    if let Some(settings) = rate_limit {
        let limiter = rate_limit::layer(settings).context("Invalid rate limit settings")?;
        api_router = api_router.layer(limiter);
    }

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest(API_PREFIX, api_router)
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
        .layer(tracing::layer());

    Ok(router)
}

/// Strips trailing slashes before routing, so `/api/v1/users/` matches
/// `/api/v1/users`.
pub fn with_normalized_path(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

//! Application router: route groups, their deadlines and the shared
//! middleware stack.
//!
//! `main.rs` and the integration tests both go through [`build_app_router`],
//! so the layering under test is the layering that ships.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Build the full application [`Router`].
///
/// ```text
/// /health                                        liveness (GET)
///
/// /api/v1/takeone/webhook                        TakeOne notifications (POST)
///
/// /api/v1/providers/{id}/takeone-user            register with TakeOne (POST)
/// /api/v1/providers/{id}/video                   get, provision + invite (POST)
/// /api/v1/providers/{id}/video/refresh           pull stream from TakeOne (POST)
/// ```
///
/// Routes that only touch the database run under `request_timeout`. Provider
/// routes wait on TakeOne and get [`ServerConfig::onboarding_timeout`].
///
/// Shared layers, outermost first: CORS, request ID, tracing, request ID
/// propagation, panic recovery.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(local_routes(config))
        .merge(provider_routes(config))
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// Health and the webhook receiver.
fn local_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/takeone", routes::takeone::router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
}

/// Provider onboarding and refresh. A deadline here means TakeOne was slow,
/// hence 504.
fn provider_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/api/v1/providers", routes::provider::router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            config.onboarding_timeout(),
        ))
}

/// CORS for the Musicspace web app. Origins are validated when the config
/// is loaded.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_origins.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

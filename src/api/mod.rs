pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;

pub fn router(pool: SqlitePool, cors: CorsLayer) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/sensor-data/",
            post(handlers::ingest).get(handlers::list_readings),
        )
        .route("/sensor-data/latest/", get(handlers::get_latest))
        .route("/sensor-data/by-date/", get(handlers::get_by_date))
        .route("/sensor-data/time-range/", get(handlers::get_by_time_range))
        .route(
            "/sensor-data/last-n-minutes/",
            get(handlers::get_last_n_minutes),
        )
        .with_state(pool)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(cors)
}

/// Build the CORS layer from the configured origin allow-list.
///
/// An empty list allows any origin, method and header — fine for a ground
/// station on a closed network, not for anything internet-facing, hence
/// the warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        tracing::warn!("CORS: no allowed origins configured, allowing any origin");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let mut origins = Vec::with_capacity(allowed_origins.len());
    for origin in allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(_) => tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

mod import;

use anyhow::Context;
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use ringdesign_core::Environment;
use ringdesign_scraper::RingImporter;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub importer: RingImporter,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    message: &'static str,
    timestamp: DateTime<Utc>,
}

/// CORS for the browser front end. With no configured origin, production
/// sends no `Access-Control-Allow-Origin` (cross-origin browsers are
/// refused) and every other environment allows any origin.
///
/// # Errors
///
/// Returns an error if `allowed_origin` is not a valid header value.
pub fn build_cors(
    allowed_origin: Option<&str>,
    env: &Environment,
) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")]);

    let Some(origin) = allowed_origin else {
        if *env == Environment::Production {
            tracing::warn!(
                "RINGDESIGN_ALLOWED_ORIGIN not set; cross-origin requests will be refused"
            );
            return Ok(cors);
        }
        return Ok(cors.allow_origin(Any));
    };
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("invalid RINGDESIGN_ALLOWED_ORIGIN: {origin}"))?;
    Ok(cors.allow_origin(origin))
}

fn import_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/import-ring", post(import::import_ring))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState, cors: CorsLayer) -> Router {
    let public_routes = Router::new().route("/", get(health));

    Router::new()
        .merge(public_routes)
        .merge(import_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        message: "Ring Designer API is running",
        timestamp: Utc::now(),
    })
}

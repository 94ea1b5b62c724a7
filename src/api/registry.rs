use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::fallback::{method_not_allowed, not_found};
use crate::api::state::AppState;
use crate::modules::{auth, catalog, reviews, users};

pub const API_PREFIX: &str = "/api/v1";

/// Single source of truth for every HTTP route.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::handlers::routes())
        .merge(catalog::handlers::routes())
        .merge(reviews::handlers::routes())
        .merge(users::handlers::routes());

    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness plus pool statistics when a database is attached.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    match &state.database {
        Some(database) => Json(json!({
            "status": "ok",
            "database": database.pool_status(),
        })),
        None => Json(json!({ "status": "ok" })),
    }
}

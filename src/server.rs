use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::MovieRepo;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn MovieRepo>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn MovieRepo>) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/movies", get(crate::api::get_movies))
        .route("/health", get(crate::api::health))
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    // Answer CORS preflight for unmatched paths; everything else is a 404.
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

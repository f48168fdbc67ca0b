// src/presentation/http/routes.rs
use crate::presentation::http::controllers::oauth;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    http::Method,
    routing::{get, post},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .route("/oauth/consent", get(oauth::consent))
        .route("/oauth/token", post(oauth::token))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}

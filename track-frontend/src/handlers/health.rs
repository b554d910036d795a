use crate::services::get_metrics;
use axum::{http::header::CONTENT_TYPE, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "aiimtrack",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn metrics() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], get_metrics())
}

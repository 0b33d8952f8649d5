use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::error_responses::AppError;

#[derive(Debug, Clone)]
pub struct HealthInfo {
    pub store: &'static str,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server_time: DateTime<Utc>,
    pub store: &'static str,
    pub endpoints: Vec<String>,
}

pub async fn not_found() -> impl IntoResponse {
    info!("router: not_found handler invoked");
    AppError::NotFound
}

pub async fn health_check(State(health_info): State<Arc<HealthInfo>>) -> impl IntoResponse {
    debug!("router: health_check handler invoked");
    Json(HealthResponse {
        status: "OK",
        server_time: Utc::now(),
        store: health_info.store,
        endpoints: health_info.endpoints.clone(),
    })
}

use axum::{Json, Router, response::IntoResponse, routing::post};
use iptv_core::domain::value_objects::identities::{IdentityDto, LoginModel, RegisterModel};
use serde::Serialize;

use crate::usecases::identities;

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub success: bool,
    pub user_id: String,
    pub username: String,
}

impl From<IdentityDto> for IdentityResponse {
    fn from(value: IdentityDto) -> Self {
        Self {
            success: true,
            user_id: value.user_id,
            username: value.username,
        }
    }
}

pub fn routes() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(Json(register_model): Json<RegisterModel>) -> impl IntoResponse {
    Json(IdentityResponse::from(identities::register(register_model)))
}

pub async fn login(Json(login_model): Json<LoginModel>) -> impl IntoResponse {
    Json(IdentityResponse::from(identities::login(login_model)))
}

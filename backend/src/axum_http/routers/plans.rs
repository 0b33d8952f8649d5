use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use iptv_core::domain::value_objects::plans::PlanDto;
use serde::Serialize;

use crate::usecases::plans::PlanCatalogUseCase;

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub success: bool,
    pub plans: Vec<PlanDto>,
}

pub fn routes() -> Router {
    Router::new()
        .route("/plans", get(list_plans))
        .with_state(Arc::new(PlanCatalogUseCase::new()))
}

pub async fn list_plans(
    State(plan_catalog_usecase): State<Arc<PlanCatalogUseCase>>,
) -> impl IntoResponse {
    Json(PlansResponse {
        success: true,
        plans: plan_catalog_usecase.list_plans(),
    })
}

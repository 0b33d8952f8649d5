use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use iptv_core::domain::{
    repositories::{messages::MessageRepository, subscriptions::SubscriptionRepository},
    value_objects::diagnostics::TablesReport,
};
use serde::Serialize;

use crate::usecases::diagnostics::DiagnosticsUseCase;

const CONNECTION_HINT: &str = "Check that the tables exist and that row level security allows this key";

#[derive(Debug, Serialize)]
pub struct ConnectionOk {
    pub success: bool,
    pub message: &'static str,
    pub table_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ConnectionFailed {
    pub success: bool,
    pub error: String,
    pub hint: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub success: bool,
    pub tables: TablesReport,
}

pub fn routes<S, M>(subscription_repository: Arc<S>, message_repository: Arc<M>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
{
    let diagnostics_usecase = DiagnosticsUseCase::new(subscription_repository, message_repository);

    Router::new()
        .route("/test-db", get(test_db::<S, M>))
        .route("/check-tables", get(check_tables::<S, M>))
        .with_state(Arc::new(diagnostics_usecase))
}

pub async fn test_db<S, M>(
    State(diagnostics_usecase): State<Arc<DiagnosticsUseCase<S, M>>>,
) -> Response
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
{
    match diagnostics_usecase.test_connection().await {
        Ok(table_count) => Json(ConnectionOk {
            success: true,
            message: "Database connected!",
            table_count,
        })
        .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ConnectionFailed {
                success: false,
                error: err.to_string(),
                hint: CONNECTION_HINT,
            }),
        )
            .into_response(),
    }
}

pub async fn check_tables<S, M>(
    State(diagnostics_usecase): State<Arc<DiagnosticsUseCase<S, M>>>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
{
    Json(TablesResponse {
        success: true,
        tables: diagnostics_usecase.check_tables().await,
    })
}

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use chrono::{DateTime, Utc};
use iptv_core::domain::{
    repositories::{messages::MessageRepository, subscriptions::SubscriptionRepository},
    value_objects::orders::SubmitOrderModel,
};
use serde::Serialize;
use tracing::info;

use crate::{
    axum_http::error_responses::AppError,
    usecases::{messages::MessageUseCase, orders::OrderUseCase},
};

const ORDER_ACKNOWLEDGEMENT: &str = "Subscription received! Check your email for confirmation.";

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: &'static str,
    pub customer_email: String,
    pub saved_to_db: bool,
    pub timestamp: DateTime<Utc>,
}

pub fn routes<S, M>(subscription_repository: Arc<S>, message_repository: Arc<M>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
{
    let message_usecase = MessageUseCase::new(message_repository);
    let order_usecase = OrderUseCase::new(subscription_repository, Arc::new(message_usecase));

    Router::new()
        .route("/subscribe", post(subscribe::<S, M>))
        .with_state(Arc::new(order_usecase))
}

pub async fn subscribe<S, M>(
    State(order_usecase): State<Arc<OrderUseCase<S, M>>>,
    Json(submit_order_model): Json<SubmitOrderModel>,
) -> Result<Json<SubscribeResponse>, AppError>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
{
    info!("subscriptions: subscribe request received");

    let receipt = order_usecase.submit_order(submit_order_model).await?;

    Ok(Json(SubscribeResponse {
        success: true,
        message: ORDER_ACKNOWLEDGEMENT,
        saved_to_db: receipt.saved_to_db(),
        customer_email: receipt.customer_email,
        timestamp: Utc::now(),
    }))
}

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use iptv_core::domain::{
    repositories::messages::MessageRepository, value_objects::messages::RecordMessageModel,
};
use serde::Serialize;
use tracing::info;

use crate::{axum_http::error_responses::AppError, usecases::messages::MessageUseCase};

const CONTACT_ACKNOWLEDGEMENT: &str = "Message received! We will contact you soon.";

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub saved_to_db: bool,
}

pub fn routes<M>(message_repository: Arc<M>) -> Router
where
    M: MessageRepository + Send + Sync + 'static,
{
    let message_usecase = MessageUseCase::new(message_repository);

    Router::new()
        .route("/contact", post(contact::<M>))
        .with_state(Arc::new(message_usecase))
}

pub async fn contact<M>(
    State(message_usecase): State<Arc<MessageUseCase<M>>>,
    Json(record_message_model): Json<RecordMessageModel>,
) -> Result<Json<ContactResponse>, AppError>
where
    M: MessageRepository + Send + Sync + 'static,
{
    info!("contact: message request received");

    let receipt = message_usecase.record_message(record_message_model).await?;

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_ACKNOWLEDGEMENT,
        saved_to_db: receipt.saved_to_db,
    }))
}

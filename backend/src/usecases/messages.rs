use chrono::Utc;
use iptv_core::domain::{
    entities::messages::InsertMessageEntity,
    repositories::messages::MessageRepository,
    value_objects::messages::{GUEST_USER_ID, MessageReceipt, RecordMessageModel},
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{UseCaseResult, ValidationError};

pub struct MessageUseCase<M>
where
    M: MessageRepository + Send + Sync,
{
    message_repository: Arc<M>,
}

impl<M> MessageUseCase<M>
where
    M: MessageRepository + Send + Sync,
{
    pub fn new(message_repository: Arc<M>) -> Self {
        Self { message_repository }
    }

    /// Validates and stores a message. A storage failure is logged and comes
    /// back as `saved_to_db: false`, never as an error.
    pub async fn record_message(
        &self,
        record_message_model: RecordMessageModel,
    ) -> UseCaseResult<MessageReceipt> {
        let subject = non_blank(record_message_model.subject);
        let message = non_blank(record_message_model.message);

        let (Some(subject), Some(message)) = (subject, message) else {
            warn!("messages: rejected message with missing subject or body");
            return Err(ValidationError::MissingFields);
        };

        let user_id =
            non_blank(record_message_model.user_id).unwrap_or_else(|| GUEST_USER_ID.to_string());

        let insert_message_entity = InsertMessageEntity {
            user_id: user_id.clone(),
            subject,
            message,
            created_at: Utc::now(),
        };

        let saved_to_db = match self
            .message_repository
            .insert(insert_message_entity)
            .await
        {
            Ok(()) => {
                info!(%user_id, "messages: message saved");
                true
            }
            Err(err) => {
                error!(%user_id, db_error = ?err, "messages: failed to save message");
                false
            }
        };

        Ok(MessageReceipt {
            user_id,
            saved_to_db,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

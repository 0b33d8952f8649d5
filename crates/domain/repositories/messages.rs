use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::messages::{InsertMessageEntity, MessageEntity};

#[async_trait]
#[automock]
pub trait MessageRepository {
    async fn insert(&self, insert_message_entity: InsertMessageEntity) -> Result<()>;

    /// Most recent rows first, at most `limit` of them.
    async fn sample(&self, limit: i64) -> Result<Vec<MessageEntity>>;
}

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        entities::messages::{InsertMessageEntity, MessageEntity},
        repositories::messages::MessageRepository,
    },
    infra::supabase::rest_client::SupabaseRestClient,
};

const TABLE: &str = "messages";

pub struct MessageSupabase {
    client: Arc<SupabaseRestClient>,
}

impl MessageSupabase {
    pub fn new(client: Arc<SupabaseRestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageRepository for MessageSupabase {
    async fn insert(&self, insert_message_entity: InsertMessageEntity) -> Result<()> {
        self.client.insert_row(TABLE, &insert_message_entity).await
    }

    async fn sample(&self, limit: i64) -> Result<Vec<MessageEntity>> {
        self.client.select_rows(TABLE, limit).await
    }
}

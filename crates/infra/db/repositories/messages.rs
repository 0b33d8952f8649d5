use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::messages::{InsertMessageEntity, MessageEntity},
        repositories::messages::MessageRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::messages},
};

pub struct MessagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MessagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MessageRepository for MessagePostgres {
    async fn insert(&self, insert_message_entity: InsertMessageEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(messages::table)
            .values(&insert_message_entity)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn sample(&self, limit: i64) -> Result<Vec<MessageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = messages::table
            .select(MessageEntity::as_select())
            .order(messages::created_at.desc())
            .limit(limit)
            .load::<MessageEntity>(&mut conn)?;

        Ok(rows)
    }
}

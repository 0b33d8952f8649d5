use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::infra::db::postgres::schema::messages;

#[derive(Debug, Clone, Serialize, Deserialize, Identifiable, Selectable, Queryable)]
#[diesel(table_name = messages)]
pub struct MessageEntity {
    pub id: i64,
    pub user_id: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Contact-form submissions and order notifications share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Insertable)]
#[diesel(table_name = messages)]
pub struct InsertMessageEntity {
    pub user_id: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

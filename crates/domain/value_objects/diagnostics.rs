use serde::Serialize;

use crate::domain::{
    entities::{messages::MessageEntity, subscriptions::SubscriptionEntity},
    value_objects::plans::PlanDto,
};

/// Reachability of one table as seen from this service.
#[derive(Debug, Clone, Serialize)]
pub struct TableStatus<T> {
    pub exists: bool,
    pub error: Option<String>,
    pub count: usize,
    pub sample: Vec<T>,
}

impl<T> TableStatus<T> {
    pub fn from_result(result: anyhow::Result<Vec<T>>) -> Self {
        match result {
            Ok(rows) => Self {
                exists: true,
                error: None,
                count: rows.len(),
                sample: rows,
            },
            Err(err) => Self {
                exists: false,
                error: Some(err.to_string()),
                count: 0,
                sample: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TablesReport {
    pub subscriptions: TableStatus<SubscriptionEntity>,
    pub messages: TableStatus<MessageEntity>,
    /// Served from the built-in catalog, never read from the store.
    pub plans: TableStatus<PlanDto>,
}

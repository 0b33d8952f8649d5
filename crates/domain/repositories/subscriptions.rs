use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn insert(&self, insert_subscription_entity: InsertSubscriptionEntity) -> Result<()>;

    /// Most recent rows first, at most `limit` of them.
    async fn sample(&self, limit: i64) -> Result<Vec<SubscriptionEntity>>;
}

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        repositories::subscriptions::SubscriptionRepository,
    },
    infra::supabase::rest_client::SupabaseRestClient,
};

const TABLE: &str = "subscriptions";

pub struct SubscriptionSupabase {
    client: Arc<SupabaseRestClient>,
}

impl SubscriptionSupabase {
    pub fn new(client: Arc<SupabaseRestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionSupabase {
    async fn insert(&self, insert_subscription_entity: InsertSubscriptionEntity) -> Result<()> {
        self.client
            .insert_row(TABLE, &insert_subscription_entity)
            .await
    }

    async fn sample(&self, limit: i64) -> Result<Vec<SubscriptionEntity>> {
        self.client.select_rows(TABLE, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::{
        plan_terms::compute_end_date, subscription_statuses::SubscriptionStatus,
    };
    use crate::infra::supabase::rest_client::SupabaseConfig;
    use chrono::Utc;

    fn client_from_env() -> Arc<SupabaseRestClient> {
        dotenvy::dotenv().ok();

        Arc::new(
            SupabaseRestClient::new(SupabaseConfig {
                project_url: std::env::var("SUPABASE_URL").expect("SUPABASE_URL is required"),
                secret_key: std::env::var("SUPABASE_SECRET_KEY")
                    .expect("SUPABASE_SECRET_KEY is required"),
                timeout_secs: 10,
            })
            .unwrap(),
        )
    }

    // cargo test -p iptv-core supabase::repositories::subscriptions -- --ignored --nocapture
    #[tokio::test]
    #[ignore = "writes to a real Supabase project and needs credentials in .env"]
    async fn insert_then_sample() -> Result<()> {
        let repository = SubscriptionSupabase::new(client_from_env());
        let start_date = Utc::now();

        repository
            .insert(InsertSubscriptionEntity {
                user_id: "integration_test".to_string(),
                plan_id: "monthly".to_string(),
                start_date,
                end_date: compute_end_date("monthly", start_date),
                status: SubscriptionStatus::Active.to_string(),
                created_at: Utc::now(),
            })
            .await?;

        let rows = repository.sample(5).await?;
        assert!(!rows.is_empty());
        println!("latest subscriptions: {rows:?}");

        Ok(())
    }
}

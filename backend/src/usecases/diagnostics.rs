use anyhow::Result;
use iptv_core::domain::{
    repositories::{messages::MessageRepository, subscriptions::SubscriptionRepository},
    value_objects::diagnostics::{TableStatus, TablesReport},
};
use std::sync::Arc;
use tracing::{error, info};

use super::plans::PlanCatalogUseCase;

const PROBE_ROWS: i64 = 1;
const SAMPLE_ROWS: i64 = 5;

/// Read-only store probes for operators. Unlike the write paths, failures
/// here are returned to the caller.
pub struct DiagnosticsUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync,
    M: MessageRepository + Send + Sync,
{
    subscription_repository: Arc<S>,
    message_repository: Arc<M>,
}

impl<S, M> DiagnosticsUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync,
    M: MessageRepository + Send + Sync,
{
    pub fn new(subscription_repository: Arc<S>, message_repository: Arc<M>) -> Self {
        Self {
            subscription_repository,
            message_repository,
        }
    }

    /// Reads one subscription row; returns how many came back (0 or 1).
    pub async fn test_connection(&self) -> Result<usize> {
        match self.subscription_repository.sample(PROBE_ROWS).await {
            Ok(rows) => {
                info!(row_count = rows.len(), "diagnostics: store reachable");
                Ok(rows.len())
            }
            Err(err) => {
                error!(db_error = ?err, "diagnostics: store probe failed");
                Err(err)
            }
        }
    }

    pub async fn check_tables(&self) -> TablesReport {
        let (subscriptions, messages) = tokio::join!(
            self.subscription_repository.sample(SAMPLE_ROWS),
            self.message_repository.sample(SAMPLE_ROWS),
        );

        let report = TablesReport {
            subscriptions: TableStatus::from_result(subscriptions),
            messages: TableStatus::from_result(messages),
            plans: TableStatus::from_result(Ok(PlanCatalogUseCase::new().list_plans())),
        };

        info!(
            subscriptions_ok = report.subscriptions.exists,
            subscriptions_rows = report.subscriptions.count,
            messages_ok = report.messages.exists,
            messages_rows = report.messages.count,
            plan_count = report.plans.count,
            "diagnostics: table check finished"
        );

        report
    }
}

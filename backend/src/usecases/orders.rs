use chrono::Utc;
use iptv_core::domain::{
    entities::subscriptions::InsertSubscriptionEntity,
    repositories::{messages::MessageRepository, subscriptions::SubscriptionRepository},
    value_objects::{
        enums::{plan_terms::compute_end_date, subscription_statuses::SubscriptionStatus},
        messages::{GUEST_USER_ID, RecordMessageModel},
        orders::{ORDER_SUBJECT_PREFIX, OrderReceipt, SubmitOrderModel, UNSPECIFIED_PAYMENT_METHOD},
    },
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{UseCaseResult, ValidationError, messages::MessageUseCase};

/// Takes a subscription order: stores the subscription and posts an operator
/// notification through the message use case.
///
/// The two writes are independent. Either may fail without affecting the
/// other, and neither failure rejects the order; the receipt reports each
/// outcome separately.
pub struct OrderUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync,
    M: MessageRepository + Send + Sync,
{
    subscription_repository: Arc<S>,
    message_usecase: Arc<MessageUseCase<M>>,
}

impl<S, M> OrderUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync,
    M: MessageRepository + Send + Sync,
{
    pub fn new(subscription_repository: Arc<S>, message_usecase: Arc<MessageUseCase<M>>) -> Self {
        Self {
            subscription_repository,
            message_usecase,
        }
    }

    pub async fn submit_order(&self, submit_order_model: SubmitOrderModel) -> UseCaseResult<OrderReceipt> {
        let Some(customer_info) = submit_order_model.customer_info else {
            warn!("orders: rejected order without customer info");
            return Err(ValidationError::MissingCustomerInfo);
        };

        let user_id = submit_order_model
            .user_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| GUEST_USER_ID.to_string());
        let plan_id = submit_order_model.plan_id.unwrap_or_default();
        let payment_method = submit_order_model
            .payment_method
            .filter(|method| !method.trim().is_empty())
            .unwrap_or_else(|| UNSPECIFIED_PAYMENT_METHOD.to_string());

        let start_date = Utc::now();
        let end_date = compute_end_date(&plan_id, start_date);

        info!(
            %user_id,
            %plan_id,
            %payment_method,
            customer_email = %customer_info.email,
            %end_date,
            "orders: processing subscription order"
        );

        let insert_subscription_entity = InsertSubscriptionEntity {
            user_id: user_id.clone(),
            plan_id: plan_id.clone(),
            start_date,
            end_date,
            status: SubscriptionStatus::Active.to_string(),
            created_at: Utc::now(),
        };

        let notification = RecordMessageModel {
            user_id: Some(user_id.clone()),
            subject: Some(format!("{}{}", ORDER_SUBJECT_PREFIX, customer_info.email)),
            message: Some(customer_info.order_summary(&plan_id, &payment_method)),
        };

        let (subscription_saved, message_saved) = tokio::join!(
            self.save_subscription(insert_subscription_entity),
            self.notify_operator(notification),
        );

        let receipt = OrderReceipt {
            user_id,
            plan_id,
            customer_email: customer_info.email,
            start_date,
            end_date,
            subscription_saved,
            message_saved,
        };

        if receipt.saved_to_db() {
            info!(user_id = %receipt.user_id, "orders: order recorded");
        } else {
            warn!(
                user_id = %receipt.user_id,
                subscription_saved,
                message_saved,
                "orders: order accepted but not fully persisted"
            );
        }

        Ok(receipt)
    }

    async fn save_subscription(&self, insert_subscription_entity: InsertSubscriptionEntity) -> bool {
        let user_id = insert_subscription_entity.user_id.clone();
        match self
            .subscription_repository
            .insert(insert_subscription_entity)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                error!(%user_id, db_error = ?err, "orders: failed to save subscription");
                false
            }
        }
    }

    async fn notify_operator(&self, notification: RecordMessageModel) -> bool {
        match self.message_usecase.record_message(notification).await {
            Ok(receipt) => receipt.saved_to_db,
            Err(err) => {
                error!(error = %err, "orders: operator notification was rejected");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Months};
    use iptv_core::domain::{
        repositories::{messages::MockMessageRepository, subscriptions::MockSubscriptionRepository},
        value_objects::customer_info::CustomerInfo,
    };
    use std::sync::Mutex;

    fn jane() -> CustomerInfo {
        CustomerInfo {
            fullname: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: None,
            country: None,
        }
    }

    fn order(plan_id: &str) -> SubmitOrderModel {
        SubmitOrderModel {
            user_id: Some("user_1700000000000_jane_x_com".to_string()),
            plan_id: Some(plan_id.to_string()),
            payment_method: Some("paypal".to_string()),
            customer_info: Some(jane()),
        }
    }

    fn order_usecase(
        subscription_repository: MockSubscriptionRepository,
        message_repository: MockMessageRepository,
    ) -> OrderUseCase<MockSubscriptionRepository, MockMessageRepository> {
        OrderUseCase::new(
            Arc::new(subscription_repository),
            Arc::new(MessageUseCase::new(Arc::new(message_repository))),
        )
    }

    fn subscription_repo(succeeds: bool) -> MockSubscriptionRepository {
        let mut repository = MockSubscriptionRepository::new();
        repository.expect_insert().times(1).returning(move |_| {
            Box::pin(async move {
                if succeeds {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("subscriptions table missing"))
                }
            })
        });
        repository
    }

    fn message_repo(succeeds: bool) -> MockMessageRepository {
        let mut repository = MockMessageRepository::new();
        repository.expect_insert().times(1).returning(move |_| {
            Box::pin(async move {
                if succeeds {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("permission denied for table messages"))
                }
            })
        });
        repository
    }

    #[tokio::test]
    async fn missing_customer_info_is_rejected_before_any_write() {
        let usecase = order_usecase(MockSubscriptionRepository::new(), MockMessageRepository::new());

        let result = usecase
            .submit_order(SubmitOrderModel {
                customer_info: None,
                ..order("annual")
            })
            .await;

        assert_eq!(result, Err(ValidationError::MissingCustomerInfo));
    }

    #[tokio::test]
    async fn saved_to_db_is_the_and_of_both_writes() {
        for (subscription_ok, message_ok) in [(true, true), (true, false), (false, true), (false, false)] {
            let usecase = order_usecase(subscription_repo(subscription_ok), message_repo(message_ok));

            let receipt = usecase
                .submit_order(order("monthly"))
                .await
                .expect("orders with customer info are always accepted");

            assert_eq!(receipt.subscription_saved, subscription_ok);
            assert_eq!(receipt.message_saved, message_ok);
            assert_eq!(receipt.saved_to_db(), subscription_ok && message_ok);
        }
    }

    #[tokio::test]
    async fn annual_order_ends_one_year_after_start() {
        let captured = Arc::new(Mutex::new(None));
        let captured_in_mock = Arc::clone(&captured);

        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_insert()
            .times(1)
            .returning(move |entity| {
                *captured_in_mock.lock().unwrap() = Some(entity);
                Box::pin(async { Ok(()) })
            });

        let usecase = order_usecase(subscription_repository, message_repo(true));
        let receipt = usecase.submit_order(order("annual")).await.unwrap();

        let entity = captured.lock().unwrap().clone().expect("subscription insert attempted");
        assert_eq!(entity.plan_id, "annual");
        assert_eq!(entity.status, "active");
        assert_eq!(entity.start_date, receipt.start_date);
        assert_eq!(
            Some(entity.end_date),
            entity.start_date.checked_add_months(Months::new(12))
        );
        assert_eq!(entity.end_date.year(), entity.start_date.year() + 1);
        assert!(entity.start_date <= entity.end_date);
    }

    #[tokio::test]
    async fn notification_message_describes_the_order() {
        let mut message_repository = MockMessageRepository::new();
        message_repository
            .expect_insert()
            .withf(|entity| {
                entity.user_id == "user_1700000000000_jane_x_com"
                    && entity.subject == "New IPTV Subscription - jane@x.com"
                    && entity.message
                        == "Name: Jane Doe\nEmail: jane@x.com\nPhone: N/A\nPlan: 2months\nPayment: paypal"
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let usecase = order_usecase(subscription_repo(true), message_repository);
        let receipt = usecase.submit_order(order("2months")).await.unwrap();

        assert_eq!(receipt.customer_email, "jane@x.com");
        assert!(receipt.saved_to_db());
    }

    #[tokio::test]
    async fn missing_identifiers_fall_back_to_defaults() {
        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_insert()
            .withf(|entity| entity.user_id == "guest" && entity.plan_id.is_empty())
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let mut message_repository = MockMessageRepository::new();
        message_repository
            .expect_insert()
            .withf(|entity| entity.user_id == "guest" && entity.message.ends_with("Payment: unspecified"))
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let usecase = order_usecase(subscription_repository, message_repository);
        let receipt = usecase
            .submit_order(SubmitOrderModel {
                customer_info: Some(jane()),
                ..SubmitOrderModel::default()
            })
            .await
            .unwrap();

        assert_eq!(receipt.user_id, "guest");
        assert_eq!(
            Some(receipt.end_date),
            receipt.start_date.checked_add_months(Months::new(1))
        );
    }
}

use std::sync::Arc;

use axum::{Router, routing::get};
use iptv_core::domain::repositories::{
    messages::MessageRepository, subscriptions::SubscriptionRepository,
};

use super::{
    default_routers::{self, HealthInfo},
    routers,
};

pub const API_ENDPOINTS: [&str; 8] = [
    "/health",
    "/plans",
    "/subscribe",
    "/contact",
    "/register",
    "/login",
    "/test-db",
    "/check-tables",
];

/// Assembles every API route under `api_prefix`. The result is a plain
/// `tower::Service`; binding it to a socket is left to the caller.
pub fn build<S, M>(
    api_prefix: &str,
    store_label: &'static str,
    subscription_repository: Arc<S>,
    message_repository: Arc<M>,
) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
{
    let health_info = HealthInfo {
        store: store_label,
        endpoints: API_ENDPOINTS
            .iter()
            .map(|path| format!("{api_prefix}{path}"))
            .collect(),
    };

    let api = Router::new()
        .route("/health", get(default_routers::health_check))
        .with_state(Arc::new(health_info))
        .merge(routers::plans::routes())
        .merge(routers::subscriptions::routes(
            Arc::clone(&subscription_repository),
            Arc::clone(&message_repository),
        ))
        .merge(routers::contact::routes(Arc::clone(&message_repository)))
        .merge(routers::accounts::routes())
        .merge(routers::diagnostics::routes(
            subscription_repository,
            message_repository,
        ));

    // axum refuses to nest at the root path.
    let app = if api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };

    app.fallback(default_routers::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use chrono::Months;
    use iptv_core::domain::{
        entities::{messages::MessageEntity, subscriptions::SubscriptionEntity},
        repositories::{messages::MockMessageRepository, subscriptions::MockSubscriptionRepository},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(
        subscription_repository: MockSubscriptionRepository,
        message_repository: MockMessageRepository,
    ) -> Router {
        build(
            "/api",
            "mock",
            Arc::new(subscription_repository),
            Arc::new(message_repository),
        )
    }

    fn idle_app() -> Router {
        app(MockSubscriptionRepository::new(), MockMessageRepository::new())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn message_repo_accepting() -> MockMessageRepository {
        let mut repository = MockMessageRepository::new();
        repository
            .expect_insert()
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        repository
    }

    #[tokio::test]
    async fn annual_order_is_saved_for_one_year() {
        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_insert()
            .withf(|entity| {
                entity.plan_id == "annual"
                    && entity.status == "active"
                    && entity.start_date.checked_add_months(Months::new(12)) == Some(entity.end_date)
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let (status, body) = send(
            app(subscription_repository, message_repo_accepting()),
            post_json(
                "/api/subscribe",
                json!({
                    "user_id": "user_1_jane",
                    "plan_id": "annual",
                    "payment_method": "paypal",
                    "customer_info": {"fullname": "Jane Doe", "email": "jane@x.com"}
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["saved_to_db"], true);
        assert_eq!(body["customer_email"], "jane@x.com");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn order_still_succeeds_when_the_store_rejects_it() {
        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_insert()
            .times(1)
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("relation does not exist")) }));

        let (status, body) = send(
            app(subscription_repository, message_repo_accepting()),
            post_json(
                "/api/subscribe",
                json!({
                    "plan_id": "monthly",
                    "customer_info": {"fullname": "Jane Doe", "email": "jane@x.com"}
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["saved_to_db"], false);
    }

    #[tokio::test]
    async fn order_without_customer_info_is_a_bad_request() {
        let (status, body) = send(
            idle_app(),
            post_json("/api/subscribe", json!({"plan_id": "annual"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "customer info missing");
    }

    #[tokio::test]
    async fn plans_are_listed_cheapest_first() {
        let (status, body) = send(idle_app(), get_request("/api/plans")).await;

        assert_eq!(status, StatusCode::OK);
        let prices: Vec<Value> = body["plans"]
            .as_array()
            .unwrap()
            .iter()
            .map(|plan| plan["price"].clone())
            .collect();
        assert_eq!(prices, vec![json!(10), json!(18), json!(70)]);
        assert_eq!(body["plans"][1]["id"], "2months");
    }

    #[tokio::test]
    async fn contact_requires_subject_and_message() {
        let (status, body) = send(
            idle_app(),
            post_json("/api/contact", json!({"subject": "Hello", "message": "   "})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "missing fields");
    }

    #[tokio::test]
    async fn contact_message_is_saved_for_a_guest() {
        let mut message_repository = MockMessageRepository::new();
        message_repository
            .expect_insert()
            .withf(|entity| entity.user_id == "guest" && entity.subject == "Hello")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let (status, body) = send(
            app(MockSubscriptionRepository::new(), message_repository),
            post_json(
                "/api/contact",
                json!({"subject": "Hello", "message": "Does the annual plan include VOD?"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["saved_to_db"], true);
        assert_eq!(body["message"], "Message received! We will contact you soon.");
    }

    #[tokio::test]
    async fn register_derives_identity_from_email_and_name() {
        let (status, body) = send(
            idle_app(),
            post_json(
                "/api/register",
                json!({"fullname": "Jane Doe", "email": "jane.doe@x.com"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "Jane");
        let user_id = body["user_id"].as_str().unwrap();
        let millis = user_id
            .strip_prefix("user_")
            .and_then(|rest| rest.strip_suffix("_jane_doe_x_com"))
            .unwrap();
        assert!(!millis.is_empty() && millis.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn login_echoes_the_username() {
        let (status, body) = send(
            idle_app(),
            post_json("/api/login", json!({"username": "jane"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["username"], "jane");
        assert!(body["user_id"].as_str().unwrap().ends_with("_jane"));
    }

    #[tokio::test]
    async fn health_lists_prefixed_endpoints() {
        let (status, body) = send(idle_app(), get_request("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["store"], "mock");
        let endpoints = body["endpoints"].as_array().unwrap();
        assert_eq!(endpoints.len(), API_ENDPOINTS.len());
        assert!(endpoints.contains(&json!("/api/subscribe")));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (status, body) = send(idle_app(), get_request("/api/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "Not found");
    }

    #[tokio::test]
    async fn test_db_reports_store_failure_as_server_error() {
        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_sample()
            .times(1)
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("invalid api key")) }));

        let (status, body) = send(
            app(subscription_repository, MockMessageRepository::new()),
            get_request("/api/test-db"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "invalid api key");
        assert!(body["hint"].is_string());
    }

    #[tokio::test]
    async fn check_tables_reports_each_table() {
        let mut subscription_repository = MockSubscriptionRepository::new();
        subscription_repository
            .expect_sample()
            .times(1)
            .returning(|_| Box::pin(async { Ok(Vec::<SubscriptionEntity>::new()) }));
        let mut message_repository = MockMessageRepository::new();
        message_repository
            .expect_sample()
            .times(1)
            .returning(|_| {
                Box::pin(async { Err::<Vec<MessageEntity>, _>(anyhow::anyhow!("permission denied")) })
            });

        let (status, body) = send(
            app(subscription_repository, message_repository),
            get_request("/api/check-tables"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tables"]["subscriptions"]["exists"], true);
        assert_eq!(body["tables"]["subscriptions"]["count"], 0);
        assert_eq!(body["tables"]["messages"]["exists"], false);
        assert_eq!(body["tables"]["messages"]["error"], "permission denied");
        assert_eq!(body["tables"]["plans"]["exists"], true);
        assert_eq!(body["tables"]["plans"]["count"], 3);
    }

    #[tokio::test]
    async fn empty_prefix_mounts_routes_at_root() {
        let app = build(
            "",
            "mock",
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(MockMessageRepository::new()),
        );

        let (status, body) = send(app, get_request("/plans")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plans"].as_array().unwrap().len(), 3);
    }
}

use crate::{
    axum_http::{error_responses::AppError, router},
    config::config_model::{DotEnvyConfig, Store},
};
use anyhow::{Context, Result, anyhow};
use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use iptv_core::infra::{
    db::{
        postgres::postgres_connection,
        repositories::{messages::MessagePostgres, subscriptions::SubscriptionPostgres},
    },
    supabase::{
        repositories::{messages::MessageSupabase, subscriptions::SubscriptionSupabase},
        rest_client::{SupabaseConfig, SupabaseRestClient},
    },
};
use std::{any::Any, net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

pub async fn start(config: Arc<DotEnvyConfig>) -> Result<()> {
    let api_prefix = config.server.api_prefix.as_str();
    let store_label = config.store.label();

    let app = match &config.store {
        Store::Supabase(supabase) => {
            let client = Arc::new(SupabaseRestClient::new(SupabaseConfig {
                project_url: supabase.url.clone(),
                secret_key: supabase.secret_key.clone(),
                timeout_secs: config.server.timeout,
            })?);
            info!("Supabase REST client has been configured");

            router::build(
                api_prefix,
                store_label,
                Arc::new(SubscriptionSupabase::new(Arc::clone(&client))),
                Arc::new(MessageSupabase::new(client)),
            )
        }
        Store::Postgres(database) => {
            let db_pool = Arc::new(postgres_connection::establish_connection(&database.url)?);
            info!("Postgres connection has been established");

            router::build(
                api_prefix,
                store_label,
                Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool))),
                Arc::new(MessagePostgres::new(db_pool)),
            )
        }
    };

    let app = with_middleware(app, &config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind port {}", config.server.port))?;

    info!(
        port = config.server.port,
        prefix = api_prefix,
        store = store_label,
        "Server is running"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down");
    Ok(())
}

fn with_middleware(app: Router, config: &DotEnvyConfig) -> Result<Router> {
    Ok(app
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(cors_layer(&config.server.cors_allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Any origin when none are configured.
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::from(AnyOrigin)
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|err| anyhow!("invalid CORS origin {origin:?}: {err}"))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(allow_origin))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "http: handler panicked");
    AppError::Internal(anyhow!("handler panicked")).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = ?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = ?err, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}

pub mod axum_http;
pub mod config;
pub mod usecases;

use std::sync::Arc;

use anyhow::Result;
use axum_http::http_serve;
use config::config_loader;
use tracing::info;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    iptv_core::observability::init_observability("backend")?;

    let dotenvy_env = config_loader::load()?;
    info!(
        stage = %dotenvy_env.stage,
        store = dotenvy_env.store.label(),
        "ENV has been loaded"
    );

    http_serve::start(Arc::new(dotenvy_env)).await
}

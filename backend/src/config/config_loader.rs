use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

use super::{
    config_model::{Database, DotEnvyConfig, Server, Store, Supabase},
    stage::Stage,
};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BODY_LIMIT_MB: u64 = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_API_PREFIX: &str = "/api";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    load_from(|key| std::env::var(key).ok())
}

/// Builds the config from any key lookup; `load` passes the process env.
pub fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let server = Server {
        port: parse_or(&var, "SERVER_PORT", DEFAULT_PORT)?,
        body_limit: parse_or(&var, "SERVER_BODY_LIMIT", DEFAULT_BODY_LIMIT_MB)?,
        timeout: parse_or(&var, "SERVER_TIMEOUT", DEFAULT_TIMEOUT_SECS)?,
        api_prefix: normalize_prefix(
            &var("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        ),
        cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
    };

    let store = match var("STORE_BACKEND")
        .unwrap_or_else(|| "supabase".to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "supabase" => Store::Supabase(Supabase {
            url: var("SUPABASE_URL").context("SUPABASE_URL is required for the supabase store")?,
            secret_key: var("SUPABASE_SECRET_KEY")
                .context("SUPABASE_SECRET_KEY is required for the supabase store")?,
        }),
        "postgres" => Store::Postgres(Database {
            url: var("DATABASE_URL").context("DATABASE_URL is required for the postgres store")?,
        }),
        other => {
            return Err(anyhow!(
                "STORE_BACKEND is invalid: {other} (expected supabase or postgres)"
            ));
        }
    };

    let stage = match var("STAGE") {
        Some(raw) => Stage::try_from(raw.as_str())?,
        None => Stage::default(),
    };

    Ok(DotEnvyConfig {
        server,
        store,
        stage,
    })
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} is invalid: {raw}")),
        None => Ok(default),
    }
}

/// `api` / `/api/` / `/api` all become `/api`; an empty or `/` prefix mounts at the root.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

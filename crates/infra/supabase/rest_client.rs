use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error};
use url::Url;

const REST_PATH: &str = "rest/v1/";

#[derive(Clone)]
pub struct SupabaseConfig {
    pub project_url: String,
    pub secret_key: String,
    pub timeout_secs: u64,
}

/// Error body returned by PostgREST on non-2xx responses.
#[derive(Debug, Deserialize)]
struct PostgrestErrorEnvelope {
    code: Option<String>,
    message: Option<String>,
    hint: Option<String>,
    details: Option<String>,
}

/// Minimal PostgREST client for the Supabase `rest/v1` API, built on reqwest.
/// One instance is shared by every repository.
pub struct SupabaseRestClient {
    http: reqwest::Client,
    rest_base: Url,
    secret_key: String,
}

impl SupabaseRestClient {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let rest_base = rest_base_url(&config.project_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build Supabase http client")?;

        Ok(Self {
            http,
            rest_base,
            secret_key: config.secret_key,
        })
    }

    pub fn table_url(&self, table: &str) -> Result<Url> {
        self.rest_base
            .join(table)
            .with_context(|| format!("invalid Supabase table name: {table}"))
    }

    /// Inserts a single row. https://postgrest.org/en/stable/references/api/tables_views.html#insert
    pub async fn insert_row<T>(&self, table: &str, row: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let url = self.table_url(table)?;
        debug!(%table, "supabase: inserting row");

        let resp = self
            .http
            .post(url)
            .header("apikey", &self.secret_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .with_context(|| format!("Supabase insert into {table} failed to send"))?;
        Self::ensure_success(resp, table, "insert").await?;

        Ok(())
    }

    /// Reads up to `limit` rows, newest first.
    pub async fn select_rows<T>(&self, table: &str, limit: i64) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        debug!(%table, limit, "supabase: selecting rows");

        let limit = limit.to_string();
        let resp = self
            .http
            .get(url)
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .header("apikey", &self.secret_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .send()
            .await
            .with_context(|| format!("Supabase select from {table} failed to send"))?;
        let resp = Self::ensure_success(resp, table, "select").await?;

        let rows = resp
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("Supabase select from {table} returned unexpected rows"))?;
        Ok(rows)
    }

    async fn ensure_success(
        resp: reqwest::Response,
        table: &str,
        operation: &str,
    ) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let summary = describe_failure(&body);

        error!(
            status = %status,
            %table,
            %operation,
            postgrest_error = %summary,
            "supabase: rest request failed"
        );

        anyhow::bail!(
            "Supabase {} on {} failed (status {}): {}",
            operation,
            table,
            status.as_u16(),
            summary
        );
    }
}

fn rest_base_url(project_url: &str) -> Result<Url> {
    let trimmed = project_url.trim().trim_end_matches('/');
    let base = Url::parse(&format!("{}/", trimmed))
        .context("SUPABASE_URL is not a valid URL")?;
    base.join(REST_PATH)
        .context("failed to derive Supabase REST endpoint")
}

/// Turns a PostgREST error body into a single line. Falls back to a short
/// preview of the raw body when it is not the usual JSON envelope.
fn describe_failure(body: &str) -> String {
    match serde_json::from_str::<PostgrestErrorEnvelope>(body) {
        Ok(envelope) => {
            let mut detail = envelope
                .message
                .unwrap_or_else(|| "unknown PostgREST error".to_string());
            if let Some(code) = envelope.code {
                detail = format!("{detail} [code={code}]");
            }
            if let Some(hint) = envelope.hint.filter(|h| !h.is_empty()) {
                detail.push_str(&format!("; hint: {hint}"));
            }
            if let Some(details) = envelope.details.filter(|d| !d.is_empty()) {
                detail.push_str(&format!("; details: {details}"));
            }
            detail
        }
        Err(_) => body.trim().chars().take(512).collect(),
    }
}

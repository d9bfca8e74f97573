use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::traits::Datastore;

/// PostgREST-style HTTP datastore backend.
///
/// # Wire layout
/// - insert: `POST {base}/rest/v1/{table}` with a JSON row
/// - upsert: same, plus `?on_conflict={key}` and merge-duplicates resolution
/// - select: `GET {base}/rest/v1/{table}?{col}=eq.{value}&limit=1`
/// - procedure: `POST {base}/rest/v1/rpc/{name}` with an empty JSON body
///
/// Authentication is a static API key sent both as `apikey` and as a bearer
/// token, which is how hosted PostgREST deployments expect it.
pub struct RestDatastore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestDatastore {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key).context("invalid api key")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .context("invalid api key")?,
        );
        Ok(headers)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Turn a non-2xx response into an error carrying the body text, so the
    /// backend's own message is what callers surface.
    async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(anyhow!("{} failed with {}: {}", what, status, body))
    }
}

#[async_trait]
impl Datastore for RestDatastore {
    fn name(&self) -> &'static str {
        "rest-datastore"
    }

    async fn insert_row(&self, table: &str, row: &Value) -> Result<()> {
        debug!("REST insert into {}", table);
        let resp = self
            .client
            .post(self.table_url(table))
            .headers(self.headers()?)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .with_context(|| format!("insert into {} did not reach the datastore", table))?;
        Self::check(resp, "insert").await?;
        Ok(())
    }

    async fn upsert_row(&self, table: &str, row: &Value, conflict_key: &str) -> Result<()> {
        debug!("REST upsert into {} on {}", table, conflict_key);
        let url = format!("{}?on_conflict={}", self.table_url(table), conflict_key);
        let resp = self
            .client
            .post(url)
            .headers(self.headers()?)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await
            .with_context(|| format!("upsert into {} did not reach the datastore", table))?;
        Self::check(resp, "upsert").await?;
        Ok(())
    }

    async fn select_row(
        &self,
        table: &str,
        filter_column: &str,
        filter_value: &str,
    ) -> Result<Option<Value>> {
        debug!("REST select from {} where {}={}", table, filter_column, filter_value);
        let url = format!(
            "{}?{}=eq.{}&limit=1",
            self.table_url(table),
            filter_column,
            filter_value
        );
        let resp = self
            .client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .with_context(|| format!("select from {} did not reach the datastore", table))?;
        let resp = Self::check(resp, "select").await?;
        let mut rows: Vec<Value> = resp
            .json()
            .await
            .context("select response was not a JSON array")?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    async fn call_procedure(&self, name: &str) -> Result<()> {
        debug!("REST rpc {}", name);
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, name);
        let resp = self
            .client
            .post(url)
            .headers(self.headers()?)
            .json(&serde_json::json!({}))
            .send()
            .await
            .with_context(|| format!("procedure {} did not reach the datastore", name))?;
        Self::check(resp, "procedure").await?;
        Ok(())
    }
}

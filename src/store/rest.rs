//! REST gateway for a PostgREST-style `trainings` table
//!
//! Works with Supabase (`https://<project>.supabase.co`) or any PostgREST
//! server exposing `/rest/v1/<table>`.
//!
//! | Operation      | Request                                              |
//! |----------------|------------------------------------------------------|
//! | `list_all`     | `GET ?select=id,day,type,date&order=id.desc`         |
//! | `insert`       | `POST {day,type,date}` + `Prefer: return=minimal`    |
//! | `delete_by_id` | `DELETE ?id=eq.<id>` + `Prefer: return=representation` |

use super::{StoreError, TrainingStore};
use crate::config::StoreConfig;
use crate::model::{today_label, TrainingId, TrainingRecord, TrainingType, Weekday};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;

/// Row body sent on insert (the server fills `id`)
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    day: Weekday,
    #[serde(rename = "type")]
    kind: TrainingType,
    date: &'a str,
}

pub struct RestStore {
    client: reqwest::Client,
    /// `{base}/rest/v1/{table}`
    endpoint: String,
    api_key: Option<String>,
}

impl RestStore {
    /// Create a gateway from the `[store]` config section
    ///
    /// # Errors
    /// Returns an error if no URL is configured or the HTTP client cannot be built
    pub fn new(config: &StoreConfig) -> anyhow::Result<Self> {
        let base = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                anyhow!("No store URL configured (set TREINOS_STORE_URL or [store].url)")
            })?;

        let mut builder = reqwest::Client::builder();
        // No timeout unless asked for: a hung call just leaves the spinner running
        if let Some(secs) = config.request_timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let endpoint = format!("{}/rest/v1/{}", base.trim_end_matches('/'), config.table);

        tracing::info!(
            "Initialized REST store: {} (auth: {}, timeout: {:?})",
            endpoint,
            if config.api_key.is_some() { "api key" } else { "none" },
            config.request_timeout_secs
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Request builder with auth headers applied
    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        let req = self.client.request(method, &self.endpoint);
        match &self.api_key {
            Some(key) => req
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key)),
            None => req,
        }
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Transport(format!("request timed out: {}", e))
    } else {
        StoreError::Transport(e.to_string())
    }
}

/// Read the body of a response, mapping non-2xx into [`StoreError::Server`]
async fn read_body(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(StoreError::Server {
            status: status.as_u16(),
            message,
        });
    }

    response.text().await.map_err(transport)
}

#[async_trait]
impl TrainingStore for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn list_all(&self) -> Result<Vec<TrainingRecord>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "id,day,type,date"), ("order", "id.desc")])
            .send()
            .await
            .map_err(transport)?;

        let body = read_body(response).await?;
        let mut records: Vec<TrainingRecord> =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;

        // The server already orders; keep the contract even if it ignores `order`
        records.sort_by(|a, b| b.id.cmp(&a.id));

        tracing::debug!("Fetched {} trainings", records.len());
        Ok(records)
    }

    async fn insert(&self, day: Weekday, kind: TrainingType) -> Result<(), StoreError> {
        let date = today_label();
        let row = NewRow {
            day,
            kind,
            date: &date,
        };

        let response = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(transport)?;

        read_body(response).await?;
        tracing::debug!("Inserted training: {} / {}", day, kind);
        Ok(())
    }

    async fn delete_by_id(&self, id: TrainingId) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(transport)?;

        let body = read_body(response).await?;
        let deleted: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;

        if deleted.is_empty() {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!("Deleted training {}", id);
        Ok(())
    }
}

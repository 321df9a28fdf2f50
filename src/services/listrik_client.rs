use axum::body::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

use crate::config::UpstreamConfig;

/// Upstream collection name; every call goes to `{base}/dataListrik[/...]`
const RESOURCE: &str = "dataListrik";

/// Electricity usage entry owned by the upstream service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityReading {
    pub username: String,
    pub date: String,
    pub hour: i64,
    pub usage: f64,
    /// Listing this reading is paired with
    #[serde(rename = "realEstateID", default, skip_serializing_if = "Option::is_none")]
    pub real_estate_id: Option<u32>,
    /// Fields the upstream adds that this service does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Electricity service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("Electricity service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Upstream status, content type and raw body, passed back to the caller as-is
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[derive(Clone)]
pub struct ListrikClient {
    http: Client,
    base_url: String,
}

impl ListrikClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, RESOURCE)
    }

    fn item_url(&self, username: &str) -> String {
        // Percent-encode the username as a single path segment
        match Url::parse(&self.collection_url()) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.push(username);
                }
                url.to_string()
            }
            Err(_) => format!("{}/{}", self.collection_url(), username),
        }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<ElectricityReading>, UpstreamError> {
        let response = self
            .http
            .get(self.collection_url())
            .bearer_auth(token)
            .send()
            .await?;

        let response = ensure_success(response, || "dataListrik not found".to_string()).await?;
        Ok(response.json::<Vec<ElectricityReading>>().await?)
    }

    pub async fn create(&self, token: &str, reading: &ElectricityReading) -> Result<Relayed, UpstreamError> {
        let response = self
            .http
            .post(self.collection_url())
            .bearer_auth(token)
            .json(reading)
            .send()
            .await?;

        relay(response, || "dataListrik not found".to_string()).await
    }

    pub async fn update(&self, token: &str, reading: &ElectricityReading) -> Result<Relayed, UpstreamError> {
        let response = self
            .http
            .put(self.item_url(&reading.username))
            .bearer_auth(token)
            .json(reading)
            .send()
            .await?;

        relay(response, || {
            format!("dataListrik for username '{}' not found", reading.username)
        })
        .await
    }

    pub async fn delete(&self, token: &str, username: &str) -> Result<Relayed, UpstreamError> {
        let response = self
            .http
            .delete(self.item_url(username))
            .bearer_auth(token)
            .send()
            .await?;

        relay(response, || format!("dataListrik for username '{}' not found", username)).await
    }
}

/// 404 becomes NotFound with a local message, any other non-2xx passes through
async fn ensure_success(
    response: Response,
    not_found: impl FnOnce() -> String,
) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound(not_found()));
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Electricity service responded {}: {}", status, body);
    Err(UpstreamError::Status { status, body })
}

async fn relay(response: Response, not_found: impl FnOnce() -> String) -> Result<Relayed, UpstreamError> {
    let response = ensure_success(response, not_found).await?;
    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let body = response.bytes().await?;

    Ok(Relayed {
        status,
        content_type,
        body,
    })
}

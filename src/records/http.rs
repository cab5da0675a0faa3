//! Networked record store speaking JSON over HTTP.

use crate::error::{Result, StoreError};
use crate::records::RecordStore;
use crate::types::{Achievement, AchievementId, AchievementInput};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP store configuration.
#[derive(Clone, Debug)]
pub struct HttpStoreConfig {
    /// API root; the collection lives at `{base_url}/achievements`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Record store backed by a REST endpoint.
///
/// | operation | request |
/// |-----------|---------|
/// | `list`    | `GET /achievements` |
/// | `create`  | `POST /achievements` |
/// | `update`  | `PUT /achievements/{id}` |
/// | `delete`  | `DELETE /achievements/{id}` |
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    pub fn new(config: HttpStoreConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::Config(format!("invalid base URL {:?}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "base URL cannot hold a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// URL of the achievement collection.
    pub fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("achievements");
        }
        url
    }

    /// URL of a single achievement; the id is percent-encoded as one segment.
    pub fn item_url(&self, id: &AchievementId) -> Url {
        let mut url = self.collection_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url
    }
}

/// Map a non-success response to a store error.
async fn failure(response: Response) -> StoreError {
    let status = response.status();
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    warn!(status = status.as_u16(), %message, "achievement request failed");

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => StoreError::Rejected(message),
        _ => StoreError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl RecordStore for HttpStore {
    async fn list(&self) -> Result<Vec<Achievement>> {
        let url = self.collection_url();
        debug!(%url, "listing achievements");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        Ok(response.json().await?)
    }

    async fn create(&self, input: AchievementInput) -> Result<Achievement> {
        let url = self.collection_url();
        debug!(%url, title = %input.title, "creating achievement");

        let response = self.client.post(url).json(&input).send().await?;
        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update(&self, achievement: Achievement) -> Result<Achievement> {
        let url = self.item_url(&achievement.id);
        debug!(%url, "updating achievement");

        let response = self.client.put(url).json(&achievement).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(achievement.id));
        }
        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &AchievementId) -> Result<()> {
        let url = self.item_url(id);
        debug!(%url, "deleting achievement");

        let response = self.client.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(%id, "delete of absent achievement ignored");
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        Ok(())
    }
}

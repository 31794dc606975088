use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::poll_window::PollWindow;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value as JsonValue;
use tracing::{debug, error};
use url::Url;

/// Source of raw homework status payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, window: PollWindow) -> Result<JsonValue>;
}

#[derive(Clone)]
pub struct PracticumService {
    client: Client,
    endpoint: Url,
    token: String,
}

impl PracticumService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.credentials.practicum_token.clone(),
        })
    }
}

#[async_trait]
impl StatusSource for PracticumService {
    async fn fetch_status(&self, window: PollWindow) -> Result<JsonValue> {
        debug!("Requesting homework statuses from_date={}", window);
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", window.from_date())])
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach status API {}: {}", self.endpoint, e);
                Error::Transport(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Endpoint {} unavailable, status {}", self.endpoint, status);
            return Err(Error::EndpointUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read status API response: {}", e);
            Error::Transport(e)
        })?;
        let parsed = serde_json::from_str::<JsonValue>(&body).map_err(|e| {
            error!("Status API returned invalid JSON: {}", e);
            Error::Json(e)
        })?;
        Ok(parsed)
    }
}

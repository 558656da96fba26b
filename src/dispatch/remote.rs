//! Hosted backend client
//!
//! HTTP client for the hosted emissions API, used by authenticated
//! sessions. Paths and payloads mirror the hosted service's contract:
//! `POST /manual_entry`, `POST /emissions/bulk`, `GET /emissions/{id}`,
//! `GET /dashboard/{id}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::RemoteConfig;
use crate::dispatch::{DispatchError, EmissionsBackend};
use crate::ledger::{AppendReceipt, BulkReceipt, EmissionEntry, NewEntry, Summary};

/// Client for the hosted emissions backend
pub struct RemoteClient {
    client: Client,
    config: RemoteConfig,
    token: String,
    business_id: String,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig, token: impl Into<String>, business_id: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            token: token.into(),
            business_id: business_id.into(),
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DispatchError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(map_transport_error)?;

        parse_response(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, DispatchError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        parse_response(response).await
    }
}

#[async_trait]
impl EmissionsBackend for RemoteClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn add_entry(&self, entry: NewEntry) -> Result<AppendReceipt, DispatchError> {
        let body = serde_json::to_value(&entry).map_err(|e| DispatchError::Parse(e.to_string()))?;
        self.post("manual_entry", &body).await
    }

    async fn add_bulk(&self, entries: Vec<NewEntry>) -> Result<BulkReceipt, DispatchError> {
        self.post("emissions/bulk", &json!({ "entries": entries }))
            .await
    }

    async fn dashboard(&self) -> Result<Summary, DispatchError> {
        self.get(&format!("dashboard/{}", self.business_id)).await
    }

    async fn list(&self) -> Result<Vec<EmissionEntry>, DispatchError> {
        let listing: ListPayload = self.get(&format!("emissions/{}", self.business_id)).await?;
        Ok(listing.rows)
    }
}

#[derive(serde::Deserialize)]
struct ListPayload {
    #[allow(dead_code)]
    success: bool,
    rows: Vec<EmissionEntry>,
}

fn map_transport_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        DispatchError::Timeout
    } else if err.is_connect() {
        DispatchError::Unavailable
    } else {
        DispatchError::Request(err)
    }
}

/// Parse a backend response, honoring its success-flag convention.
///
/// A 2xx body can still carry `success: false` with a message; that is an
/// operation failure, not a transport one.
async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DispatchError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(String::from)))
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(DispatchError::Backend(detail));
    }

    let value: serde_json::Value = response.json().await.map_err(DispatchError::Request)?;

    if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Operation failed");
        return Err(DispatchError::Backend(message.to_string()));
    }

    serde_json::from_value(value).map_err(|e| DispatchError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = RemoteConfig {
            url: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        let client = RemoteClient::new(config, "jwt", "biz-1");
        assert_eq!(client.url("manual_entry"), "https://api.example.com/manual_entry");
    }
}

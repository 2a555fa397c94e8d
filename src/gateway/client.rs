// src/gateway/client.rs
//
// HTTP client for the hosted backend's table API.
//
// The backend exposes table-level CRUD over REST: select by equality
// filter on a column, insert, partial update (patch), delete, plus
// named server-side functions (rpc). All operations are
// request/response; nothing is streamed.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Connection settings for the hosted backend
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Project base URL, without a trailing slash
    pub base_url: String,
    /// Public API key sent with every request
    pub api_key: String,
    /// Upper bound on any single request. The observed client had no
    /// timeout at all; a hung gateway would hang the caller forever.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the hosted backend (tabular storage + auth API).
///
/// Holds the active auth session token, if any. Cheap to share
/// behind an `Arc`.
pub struct GatewayClient {
    pub(crate) config: GatewayConfig,
    pub(crate) http_client: Client,
    pub(crate) session_token: Mutex<Option<String>>,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(config: GatewayConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            session_token: Mutex::new(None),
        })
    }

    /// True while a sign-in token is held
    pub fn has_session(&self) -> bool {
        self.session_token.lock().unwrap().is_some()
    }

    // ========================================================================
    // TABLE CRUD
    // ========================================================================

    /// Fetch every row of a table
    pub async fn select_all<T>(&self, table: &str) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let request = self
            .http_client
            .get(self.table_url(table))
            .query(&[("select", "*")]);

        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Fetch rows matching `column = value`
    pub async fn select_by<T>(&self, table: &str, column: &str, value: &str) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let filter = format!("eq.{}", value);
        let request = self
            .http_client
            .get(self.table_url(table))
            .query(&[("select", "*"), (column, filter.as_str())]);

        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Fetch zero-or-one row matching `column = value`
    pub async fn select_one<T>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self.select_by(table, column, value).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a single row
    pub async fn insert<B>(&self, table: &str, row: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http_client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(row);

        self.send(request).await?;
        Ok(())
    }

    /// Apply a sparse patch to rows matching `column = value`.
    /// Only the fields present in the patch change.
    pub async fn update<B>(
        &self,
        table: &str,
        column: &str,
        value: &str,
        patch: &B,
    ) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http_client
            .patch(self.table_url(table))
            .query(&[(column, &format!("eq.{}", value))])
            .header("Prefer", "return=minimal")
            .json(patch);

        self.send(request).await?;
        Ok(())
    }

    /// Delete rows matching `column = value`
    pub async fn delete(&self, table: &str, column: &str, value: &str) -> AppResult<()> {
        let request = self
            .http_client
            .delete(self.table_url(table))
            .query(&[(column, &format!("eq.{}", value))]);

        self.send(request).await?;
        Ok(())
    }

    /// Call a named server-side function and decode its result
    pub async fn rpc<T>(&self, function: &str, args: serde_json::Value) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/rest/v1/rpc/{}", self.config.base_url, function);
        let request = self.http_client.post(url).json(&args);

        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    // ========================================================================
    // INTERNAL: request plumbing
    // ========================================================================

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    /// Attach auth headers, send, and map non-success statuses.
    /// Requests are authorized with the session token when signed in,
    /// falling back to the public API key.
    pub(crate) async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let bearer = {
            let session = self.session_token.lock().unwrap();
            session.clone().unwrap_or_else(|| self.config.api_key.clone())
        };

        let response = request
            .header("apikey", &self.config.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::check_status(response).await
    }

    pub(crate) async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(AppError::NotFound),
            StatusCode::UNAUTHORIZED => Err(AppError::AuthenticationRequired),
            _ => Err(AppError::Gateway(format!(
                "Gateway returned status {}: {}",
                status, body
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = GatewayConfig::new("https://example.backend.co", "anon-key");
        let client = GatewayClient::new(config).unwrap();
        assert!(!client.has_session());
        assert_eq!(client.config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_table_url_formatting() {
        let config = GatewayConfig::new("https://example.backend.co", "anon-key");
        let client = GatewayClient::new(config).unwrap();
        assert_eq!(
            client.table_url("reservation"),
            "https://example.backend.co/rest/v1/reservation"
        );
    }

    // Note: Real API tests would be in an integration suite and would
    // run against a disposable backend project.
}

// src/gateway/auth.rs
//
// Authentication API of the hosted backend.
//
// Session handling is deliberately minimal: the access token lives in
// memory for the lifetime of the client. Persisting sessions across
// launches is a presentation-layer concern and stays out of this core.

use chrono::{DateTime, Utc};
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::gateway::client::GatewayClient;

/// Identity record as the auth API returns it.
/// `user_metadata` is free-form; known keys (e.g. `full_name`) are
/// read by the identity adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserRecord {
    pub id: Uuid,
    pub email: Option<String>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// Response of a password sign-in
#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    user: AuthUserRecord,
}

impl GatewayClient {
    /// Register a new account. The display name travels in the
    /// free-form metadata under `full_name`.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> AppResult<AuthUserRecord> {
        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        });

        let request = self.http_client.post(self.auth_url("signup")).json(&body);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Exchange credentials for a session. Stores the access token on
    /// success; invalid credentials surface as an authentication error.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<AuthUserRecord> {
        let body = json!({ "email": email, "password": password });

        let request = self
            .http_client
            .post(format!("{}?grant_type=password", self.auth_url("token")))
            .header("apikey", &self.config.api_key)
            .json(&body);

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::AuthenticationFailed(message));
        }
        let response = Self::check_status(response).await?;

        let session: SessionResponse = response.json().await?;
        {
            let mut token = self.session_token.lock().unwrap();
            *token = Some(session.access_token);
        }
        Ok(session.user)
    }

    /// Fetch the identity record behind the current session.
    /// `None` (not an error) when no session is active or the token
    /// has expired.
    pub async fn current_user(&self) -> AppResult<Option<AuthUserRecord>> {
        if !self.has_session() {
            return Ok(None);
        }

        let request = self.http_client.get(self.auth_url("user"));
        match self.send(request).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(AppError::AuthenticationRequired) => {
                // Stale token; drop it so callers see a clean "no session"
                let mut token = self.session_token.lock().unwrap();
                *token = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// End the current session. The revocation call must carry the
    /// session token itself, so it is captured before the stored copy
    /// is dropped; the local token is cleared even when the remote
    /// call fails.
    pub async fn sign_out(&self) -> AppResult<()> {
        let token = {
            let mut session = self.session_token.lock().unwrap();
            session.take()
        };

        let Some(token) = token else {
            return Ok(());
        };

        let response = self
            .http_client
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url, endpoint)
    }
}

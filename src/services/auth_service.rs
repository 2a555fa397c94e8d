// src/services/auth_service.rs
//
// Identity adapter: wraps the gateway's auth API into domain `User`
// values. Accounts themselves are owned by the identity provider;
// this service only reads and maps.

use std::sync::Arc;

use crate::domain::User;
use crate::error::AppResult;
use crate::events::{EventBus, UserLoggedIn, UserRegistered};
use crate::gateway::{AuthUserRecord, GatewayClient};

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub struct AuthService {
    gateway: Arc<GatewayClient>,
    event_bus: Arc<EventBus>,
}

impl AuthService {
    pub fn new(gateway: Arc<GatewayClient>, event_bus: Arc<EventBus>) -> Self {
        Self { gateway, event_bus }
    }

    /// Create an account. The display name is stored in the identity
    /// record's free-form metadata.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let record = self
            .gateway
            .sign_up(&request.email, &request.password, &request.full_name)
            .await?;

        let user = map_user(record);
        self.event_bus
            .emit(UserRegistered::new(user.id, user.email.clone()));
        Ok(user)
    }

    /// Sign in with credentials. Invalid credentials surface as an
    /// authentication error, not a generic gateway failure.
    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        let record = self
            .gateway
            .sign_in_with_password(&request.email, &request.password)
            .await?;

        let user = map_user(record);
        log::info!("User {} signed in", user.id);
        self.event_bus.emit(UserLoggedIn::new(user.id));
        Ok(user)
    }

    /// The user behind the active session, or `None` (not an error)
    /// when no session is active
    pub async fn current_user(&self) -> AppResult<Option<User>> {
        let record = self.gateway.current_user().await?;
        Ok(record.map(map_user))
    }

    /// End the active session
    pub async fn logout(&self) -> AppResult<()> {
        self.gateway.sign_out().await
    }
}

/// Mapping rules from the identity record:
/// - `full_name` comes from the free-form metadata and defaults to ""
/// - `email_confirmed` is derived from the confirmation timestamp
fn map_user(record: AuthUserRecord) -> User {
    let full_name = record
        .user_metadata
        .get("full_name")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    User {
        id: record.id,
        full_name,
        email: record.email.unwrap_or_default(),
        email_confirmed: record.email_confirmed_at.is_some(),
        created_at: record.created_at,
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user, as seen by this core.
/// Owned by the identity provider; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Display name, read from free-form auth metadata.
    /// Empty string when the identity record carries none.
    pub full_name: String,

    pub email: String,

    /// Derived from the presence of a confirmation timestamp
    /// on the identity record
    pub email_confirmed: bool,

    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// An in-app message for a user, e.g. a purchase confirmation.
/// Mutable only through the mark-as-read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            message,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

/// Message cannot be empty
pub fn validate_notification(notification: &Notification) -> DomainResult<()> {
    if notification.message.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Notification message cannot be empty".to_string(),
        ));
    }
    Ok(())
}

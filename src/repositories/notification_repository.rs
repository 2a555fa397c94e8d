// src/repositories/notification_repository.rs
//
// Notification persistence over the `notifications` table

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Notification;
use crate::error::AppResult;
use crate::gateway::GatewayClient;

const TABLE: &str = "notifications";
const KEY_COLUMN: &str = "notification_id";
const USER_COLUMN: &str = "user_id";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> AppResult<()>;
    async fn mark_as_read(&self, id: Uuid) -> AppResult<()>;
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;
}

/// Row shape of the `notifications` table
#[derive(Debug, Serialize, Deserialize)]
struct NotificationRow {
    notification_id: Uuid,
    user_id: Uuid,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl NotificationRow {
    fn into_notification(self) -> Notification {
        Notification {
            id: self.notification_id,
            user_id: self.user_id,
            message: self.message,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }

    fn from_notification(notification: &Notification) -> Self {
        Self {
            notification_id: notification.id,
            user_id: notification.user_id,
            message: notification.message.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

pub struct RestNotificationRepository {
    gateway: Arc<GatewayClient>,
}

impl RestNotificationRepository {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl NotificationRepository for RestNotificationRepository {
    async fn create(&self, notification: &Notification) -> AppResult<()> {
        self.gateway
            .insert(TABLE, &NotificationRow::from_notification(notification))
            .await
    }

    async fn mark_as_read(&self, id: Uuid) -> AppResult<()> {
        self.gateway
            .update(TABLE, KEY_COLUMN, &id.to_string(), &json!({ "is_read": true }))
            .await
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let rows: Vec<NotificationRow> = self
            .gateway
            .select_by(TABLE, USER_COLUMN, &user_id.to_string())
            .await?;
        Ok(rows
            .into_iter()
            .map(NotificationRow::into_notification)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_notification() {
        let raw = r#"{
            "notification_id": "0d9c1b2a-3e4f-5a6b-8c7d-9e0f1a2b3c4d",
            "user_id": "7cbb6329-52b5-4b0c-b04c-d7f22fb4f5d6",
            "message": "You reserved 3 tickets for Tomorrowland 2024",
            "is_read": false,
            "created_at": "2024-11-02T10:00:00Z"
        }"#;
        let row: NotificationRow = serde_json::from_str(raw).unwrap();
        let notification = row.into_notification();
        assert!(!notification.is_read);
        assert!(notification.message.contains("3 tickets"));
    }
}

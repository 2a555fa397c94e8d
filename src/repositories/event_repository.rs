// src/repositories/event_repository.rs
//
// Event persistence over the hosted backend's `event` table

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Coordinates, Event};
use crate::error::{AppError, AppResult};
use crate::gateway::GatewayClient;

const TABLE: &str = "event";
const KEY_COLUMN: &str = "eventid";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Event>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Event>>;
    async fn create(&self, event: &Event) -> AppResult<()>;
    /// Sparse patch: only the supplied fields change
    async fn update(&self, id: Uuid, patch: EventPatch) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Conditional capacity decrement, resolved server-side:
    /// "decrement tickets_remaining by `count` where
    /// tickets_remaining >= count". Returns the updated event, or
    /// `None` when not enough tickets remained (no-match).
    async fn reserve_tickets(&self, id: Uuid, count: u32) -> AppResult<Option<Event>>;

    /// Compensating increment for a reservation that failed to persist
    /// after its tickets were already taken
    async fn release_tickets(&self, id: Uuid, count: u32) -> AppResult<Event>;
}

/// Sparse update for the `event` table. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "ticketsremaining", skip_serializing_if = "Option::is_none")]
    pub tickets_remaining: Option<u32>,
    #[serde(rename = "maplocation", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "ticketprice", skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
}

/// Row shape of the `event` table
#[derive(Debug, Serialize, Deserialize)]
struct EventRow {
    eventid: Uuid,
    title: String,
    description: String,
    location: String,
    date: DateTime<Utc>,
    capacity: u32,
    ticketsremaining: u32,
    maplocation: Coordinates,
    ticketprice: f64,
}

impl EventRow {
    fn into_event(self) -> Event {
        Event {
            id: self.eventid,
            title: self.title,
            description: self.description,
            location: self.location,
            date: self.date,
            capacity: self.capacity,
            tickets_remaining: self.ticketsremaining,
            coordinates: self.maplocation,
            ticket_price: self.ticketprice,
        }
    }

    fn from_event(event: &Event) -> Self {
        Self {
            eventid: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            date: event.date,
            capacity: event.capacity,
            ticketsremaining: event.tickets_remaining,
            maplocation: event.coordinates,
            ticketprice: event.ticket_price,
        }
    }
}

pub struct RestEventRepository {
    gateway: Arc<GatewayClient>,
}

impl RestEventRepository {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl EventRepository for RestEventRepository {
    async fn list(&self) -> AppResult<Vec<Event>> {
        let rows: Vec<EventRow> = self.gateway.select_all(TABLE).await?;
        Ok(rows.into_iter().map(EventRow::into_event).collect())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Event>> {
        let row: Option<EventRow> = self
            .gateway
            .select_one(TABLE, KEY_COLUMN, &id.to_string())
            .await?;
        Ok(row.map(EventRow::into_event))
    }

    async fn create(&self, event: &Event) -> AppResult<()> {
        self.gateway
            .insert(TABLE, &EventRow::from_event(event))
            .await
    }

    async fn update(&self, id: Uuid, patch: EventPatch) -> AppResult<()> {
        self.gateway
            .update(TABLE, KEY_COLUMN, &id.to_string(), &patch)
            .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.gateway
            .delete(TABLE, KEY_COLUMN, &id.to_string())
            .await
    }

    async fn reserve_tickets(&self, id: Uuid, count: u32) -> AppResult<Option<Event>> {
        // The function patches the row only when enough tickets remain
        // and returns the updated row; an empty result is a no-match.
        let rows: Vec<EventRow> = self
            .gateway
            .rpc(
                "reserve_event_tickets",
                json!({ "event_id": id, "ticket_count": count }),
            )
            .await?;
        Ok(rows.into_iter().next().map(EventRow::into_event))
    }

    async fn release_tickets(&self, id: Uuid, count: u32) -> AppResult<Event> {
        let rows: Vec<EventRow> = self
            .gateway
            .rpc(
                "release_event_tickets",
                json!({ "event_id": id, "ticket_count": count }),
            )
            .await?;
        rows.into_iter()
            .next()
            .map(EventRow::into_event)
            .ok_or(AppError::NotFound)
    }
}

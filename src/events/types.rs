// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when an organizer-created event lands in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub catalog_event_id: Uuid,
    pub title: String,
}

impl EventCreated {
    pub fn new(catalog_event_id: Uuid, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            catalog_event_id,
            title,
        }
    }
}

impl DomainEvent for EventCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EventCreated" }
}

/// Emitted when catalog event fields are patched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub catalog_event_id: Uuid,
}

impl EventUpdated {
    pub fn new(catalog_event_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            catalog_event_id,
        }
    }
}

impl DomainEvent for EventUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EventUpdated" }
}

// ============================================================================
// IDENTITY EVENTS
// ============================================================================

/// Emitted after a successful account registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: String,
}

impl UserRegistered {
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            email,
        }
    }
}

impl DomainEvent for UserRegistered {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserRegistered" }
}

/// Emitted after a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedIn {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl UserLoggedIn {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

impl DomainEvent for UserLoggedIn {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserLoggedIn" }
}

// ============================================================================
// PURCHASE EVENTS
// ============================================================================

/// Emitted when capacity was taken from an event (the decrement itself)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketsReserved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub catalog_event_id: Uuid,
    pub tickets: u32,
    pub tickets_remaining: u32,
}

impl TicketsReserved {
    pub fn new(catalog_event_id: Uuid, tickets: u32, tickets_remaining: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            catalog_event_id,
            tickets,
            tickets_remaining,
        }
    }
}

impl DomainEvent for TicketsReserved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "TicketsReserved" }
}

/// Emitted once per fully persisted purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reservation_id: Uuid,
    pub user_id: Uuid,
    pub catalog_event_id: Uuid,
    pub event_title: String,
    pub tickets: u32,
    pub total_price: f64,
}

impl PurchaseCompleted {
    pub fn new(
        reservation_id: Uuid,
        user_id: Uuid,
        catalog_event_id: Uuid,
        event_title: String,
        tickets: u32,
        total_price: f64,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reservation_id,
            user_id,
            catalog_event_id,
            event_title,
            tickets,
            total_price,
        }
    }
}

impl DomainEvent for PurchaseCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PurchaseCompleted" }
}

/// Emitted when a purchase attempt terminates in the failed state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub catalog_event_id: Uuid,
    pub user_id: Uuid,
    pub tickets: u32,
    pub reason: String,
}

impl PurchaseFailed {
    pub fn new(catalog_event_id: Uuid, user_id: Uuid, tickets: u32, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            catalog_event_id,
            user_id,
            tickets,
            reason,
        }
    }
}

impl DomainEvent for PurchaseFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PurchaseFailed" }
}

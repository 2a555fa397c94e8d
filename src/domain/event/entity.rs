use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic position of an event venue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A ticketed occurrence with finite capacity and a price.
/// This is the root entity for everything the purchase flow touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Event title shown in listings
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Human-readable venue text (address or place name)
    pub location: String,

    /// Scheduled date and time
    pub date: DateTime<Utc>,

    /// Maximum number of tickets that can ever be sold
    pub capacity: u32,

    /// Tickets still available; only ever decreases, one decrement
    /// per created reservation
    pub tickets_remaining: u32,

    /// Venue position for the map view
    pub coordinates: Coordinates,

    /// Price of a single ticket
    pub ticket_price: f64,
}

impl Event {
    /// Create a new Event with full capacity still available
    pub fn new(
        title: String,
        description: String,
        location: String,
        date: DateTime<Utc>,
        capacity: u32,
        coordinates: Coordinates,
        ticket_price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            location,
            date,
            capacity,
            tickets_remaining: capacity,
            coordinates,
            ticket_price,
        }
    }

    /// True when no tickets are left
    pub fn is_sold_out(&self) -> bool {
        self.tickets_remaining == 0
    }
}

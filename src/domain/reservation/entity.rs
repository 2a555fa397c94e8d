use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted record of a user purchasing N tickets for an Event.
/// Created exactly once per successful purchase, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Internal immutable identifier
    pub id: Uuid,

    /// The buying user (owned by the identity provider)
    pub user_id: Uuid,

    /// The referenced event
    pub event_id: Uuid,

    /// Number of tickets bought in this purchase
    pub tickets: u32,

    /// tickets x event price at the time of purchase
    pub total_price: f64,

    /// When the purchase was made
    pub timestamp: DateTime<Utc>,
}

impl Reservation {
    /// Create a new Reservation for a completed purchase
    pub fn new(user_id: Uuid, event_id: Uuid, tickets: u32, total_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            tickets,
            total_price,
            timestamp: Utc::now(),
        }
    }
}

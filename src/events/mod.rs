// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod handlers;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Catalog
    EventCreated,
    EventUpdated,
    // Purchase workflow
    PurchaseCompleted,
    PurchaseFailed,
    TicketsReserved,
    // Identity
    UserLoggedIn,
    UserRegistered,
};

pub use bus::{EventBus, EventLogEntry};

pub use handlers::register_notification_handlers;

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}

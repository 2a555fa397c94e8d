// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod auth_service;
pub mod event_service;
pub mod purchase_service;
pub mod purchase_slider;
pub mod reservation_service;


// Re-export all services and their types
pub use auth_service::{AuthService, LoginRequest, RegisterRequest};

pub use event_service::{CreateEventRequest, EventService};

pub use purchase_service::{
    selectable_tickets, PurchaseError, PurchaseService, PurchaseState, MAX_TICKETS_PER_PURCHASE,
};

pub use purchase_slider::{PurchaseSlider, SlideOutcome, SliderConfig};

pub use reservation_service::ReservationService;

// src/lib.rs
// Yevent - event discovery and ticketing core
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Gateway at the edge: the hosted backend is consumed, never implemented
// - Repositories are dumb data mappers; services orchestrate
// - Event-driven: services coordinate through the event bus
// - Headless: screens, navigation and styling live in the app shell,
//   not here

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;
pub mod gateway;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_event,
    validate_notification,
    validate_reservation,
    Coordinates,
    // Event
    Event,
    // Notification
    Notification,
    // Reservation
    Reservation,
    // User (read-only)
    User,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    register_notification_handlers,
    DomainEvent,
    EventBus,
    EventCreated,
    EventLogEntry,
    EventUpdated,
    PurchaseCompleted,
    PurchaseFailed,
    TicketsReserved,
    UserLoggedIn,
    UserRegistered,
};

// ============================================================================
// PUBLIC API - Gateway
// ============================================================================

pub use gateway::{AuthUserRecord, GatewayClient, GatewayConfig};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    EventPatch,
    EventRepository,
    NotificationRepository,
    ReservationRepository,
    RestEventRepository,
    RestNotificationRepository,
    RestReservationRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    selectable_tickets,
    // Identity adapter
    AuthService,
    CreateEventRequest,
    // Catalog
    EventService,
    LoginRequest,
    // Purchase workflow
    PurchaseError,
    PurchaseService,
    // Slide to confirm
    PurchaseSlider,
    PurchaseState,
    RegisterRequest,
    // Reservations (read side)
    ReservationService,
    SlideOutcome,
    SliderConfig,
    MAX_TICKETS_PER_PURCHASE,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod event;
pub mod notification;
pub mod reservation;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Event Domain
pub use event::{validate_event, Coordinates, Event};

// Reservation Domain
pub use reservation::{validate_reservation, Reservation};

// Notification Domain
pub use notification::{validate_notification, Notification};

// User (read-only, owned by the identity provider)
pub use user::User;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Requested {requested} tickets but only {remaining} remain")]
    TicketsExceedRemaining { requested: u32, remaining: u32 },

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

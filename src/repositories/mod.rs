// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - One table per repository, typed rows at the boundary

pub mod event_repository;
pub mod notification_repository;
pub mod reservation_repository;

pub use event_repository::{EventPatch, EventRepository, RestEventRepository};
pub use notification_repository::{NotificationRepository, RestNotificationRepository};
pub use reservation_repository::{ReservationRepository, RestReservationRepository};

// src/services/purchase_service.rs
//
// Purchase Workflow - the core of the ticketing flow
//
// A single attempt walks a linear state machine:
//
//   Idle -> TicketCountSelected -> Validating -> CapacityReserved
//        -> ReservationPersisted (terminal success)
//
// with Failed reachable from Validating and CapacityReserved.
//
// The capacity decrement is resolved server-side as a conditional
// update ("take n where tickets_remaining >= n"), so two buyers racing
// on a stale read cannot oversell. Capacity decrement and reservation
// insert are still two separate writes; a failed insert triggers a
// compensating increment, and only when that increment also fails do
// the two tables diverge (logged, never silent).

use std::ops::RangeInclusive;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{validate_reservation, Event, Reservation};
use crate::error::AppError;
use crate::events::{EventBus, PurchaseCompleted, PurchaseFailed, TicketsReserved};
use crate::repositories::{EventRepository, ReservationRepository};

/// Cap on how many tickets one purchase may cover. The selection UI
/// offers 1..=min(remaining, this cap).
pub const MAX_TICKETS_PER_PURCHASE: u32 = 10;

/// States of a single purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    Idle,
    TicketCountSelected,
    Validating,
    CapacityReserved,
    ReservationPersisted,
    Failed,
}

impl PurchaseState {
    /// Legal transitions of the attempt state machine
    pub fn can_advance_to(self, next: PurchaseState) -> bool {
        use PurchaseState::*;
        matches!(
            (self, next),
            (Idle, TicketCountSelected)
                | (TicketCountSelected, Validating)
                | (Validating, CapacityReserved)
                | (Validating, Failed)
                | (CapacityReserved, ReservationPersisted)
                | (CapacityReserved, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PurchaseState::ReservationPersisted | PurchaseState::Failed
        )
    }
}

/// Why a purchase attempt ended in the failed state
#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("A purchase must cover at least one ticket")]
    InvalidTicketCount,

    #[error("Requested {requested} tickets but only {remaining} remain")]
    InsufficientTickets { requested: u32, remaining: u32 },

    #[error("Capacity update failed: {0}")]
    CapacityUpdateFailed(AppError),

    #[error("Reservation persist failed: {0}")]
    ReservationPersistFailed(AppError),
}

/// Tracks one attempt through the state machine
struct PurchaseAttempt {
    event_id: Uuid,
    state: PurchaseState,
}

impl PurchaseAttempt {
    fn new(event_id: Uuid) -> Self {
        Self {
            event_id,
            state: PurchaseState::Idle,
        }
    }

    fn advance(&mut self, next: PurchaseState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal purchase transition {:?} -> {:?}",
            self.state,
            next
        );
        log::debug!(
            "purchase[{}]: {:?} -> {:?}",
            self.event_id,
            self.state,
            next
        );
        self.state = next;
    }
}

/// The bounded ticket-count choice offered for an event:
/// 1..=min(tickets_remaining, MAX_TICKETS_PER_PURCHASE),
/// or `None` when the event is sold out.
pub fn selectable_tickets(event: &Event) -> Option<RangeInclusive<u32>> {
    if event.is_sold_out() {
        return None;
    }
    Some(1..=event.tickets_remaining.min(MAX_TICKETS_PER_PURCHASE))
}

pub struct PurchaseService {
    event_repo: Arc<dyn EventRepository>,
    reservation_repo: Arc<dyn ReservationRepository>,
    event_bus: Arc<EventBus>,
}

impl PurchaseService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        reservation_repo: Arc<dyn ReservationRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            event_repo,
            reservation_repo,
            event_bus,
        }
    }

    /// Run one purchase attempt for `ticket_count` tickets.
    ///
    /// Precondition: `user_id` belongs to the currently authenticated
    /// user; the presentation layer guards the screen behind a session.
    ///
    /// On success, returns the event with the decremented remaining
    /// count; exactly one new reservation exists for
    /// (user, event, ticket_count). Deliberately NOT idempotent: every
    /// successful call decrements further and creates another
    /// reservation.
    pub async fn purchase(
        &self,
        event: &Event,
        ticket_count: u32,
        user_id: Uuid,
    ) -> Result<Event, PurchaseError> {
        let mut attempt = PurchaseAttempt::new(event.id);
        attempt.advance(PurchaseState::TicketCountSelected);
        attempt.advance(PurchaseState::Validating);

        // -- Validating: no writes on this path ----------------------
        if ticket_count < 1 {
            attempt.advance(PurchaseState::Failed);
            return Err(self.fail(event, user_id, ticket_count, PurchaseError::InvalidTicketCount));
        }
        if ticket_count > event.tickets_remaining {
            attempt.advance(PurchaseState::Failed);
            return Err(self.fail(
                event,
                user_id,
                ticket_count,
                PurchaseError::InsufficientTickets {
                    requested: ticket_count,
                    remaining: event.tickets_remaining,
                },
            ));
        }

        // -- CapacityReserved: authoritative conditional decrement ---
        // The local check above ran against a possibly-stale read;
        // the gateway-side condition decides for real.
        let updated = match self.event_repo.reserve_tickets(event.id, ticket_count).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                // Someone else took the last tickets between our read
                // and this write. The snapshot count is what the
                // no-match just disproved, so report a fresh one.
                let remaining = self
                    .event_repo
                    .get(event.id)
                    .await
                    .ok()
                    .flatten()
                    .map(|current| current.tickets_remaining)
                    .unwrap_or(0);
                attempt.advance(PurchaseState::Failed);
                return Err(self.fail(
                    event,
                    user_id,
                    ticket_count,
                    PurchaseError::InsufficientTickets {
                        requested: ticket_count,
                        remaining,
                    },
                ));
            }
            Err(e) => {
                attempt.advance(PurchaseState::Failed);
                return Err(self.fail(
                    event,
                    user_id,
                    ticket_count,
                    PurchaseError::CapacityUpdateFailed(e),
                ));
            }
        };
        attempt.advance(PurchaseState::CapacityReserved);
        self.event_bus.emit(TicketsReserved::new(
            event.id,
            ticket_count,
            updated.tickets_remaining,
        ));

        // -- ReservationPersisted ------------------------------------
        let total_price = f64::from(ticket_count) * event.ticket_price;
        let reservation = Reservation::new(user_id, event.id, ticket_count, total_price);
        if let Err(e) = validate_reservation(&reservation) {
            self.compensate(event.id, ticket_count).await;
            attempt.advance(PurchaseState::Failed);
            return Err(self.fail(
                event,
                user_id,
                ticket_count,
                PurchaseError::ReservationPersistFailed(AppError::Domain(e)),
            ));
        }

        if let Err(e) = self.reservation_repo.create(&reservation).await {
            self.compensate(event.id, ticket_count).await;
            attempt.advance(PurchaseState::Failed);
            return Err(self.fail(
                event,
                user_id,
                ticket_count,
                PurchaseError::ReservationPersistFailed(e),
            ));
        }

        attempt.advance(PurchaseState::ReservationPersisted);
        log::info!(
            "purchase[{}]: user {} bought {} tickets for ${}",
            event.id,
            user_id,
            ticket_count,
            total_price
        );
        self.event_bus.emit(PurchaseCompleted::new(
            reservation.id,
            user_id,
            event.id,
            event.title.clone(),
            ticket_count,
            total_price,
        ));

        Ok(updated)
    }

    /// Return tickets taken by a decrement whose reservation never
    /// landed. When this corrective write fails too, the event row
    /// stays decremented with no reservation referencing it; all we
    /// can do is make the divergence loud.
    async fn compensate(&self, event_id: Uuid, ticket_count: u32) {
        match self.event_repo.release_tickets(event_id, ticket_count).await {
            Ok(restored) => {
                log::warn!(
                    "purchase[{}]: reservation persist failed, returned {} tickets ({} now remaining)",
                    event_id,
                    ticket_count,
                    restored.tickets_remaining
                );
            }
            Err(e) => {
                log::error!(
                    "purchase[{}]: DIVERGENCE - {} tickets decremented with no reservation row, compensation failed: {}",
                    event_id,
                    ticket_count,
                    e
                );
            }
        }
    }

    fn fail(
        &self,
        event: &Event,
        user_id: Uuid,
        ticket_count: u32,
        error: PurchaseError,
    ) -> PurchaseError {
        log::warn!("purchase[{}]: failed: {}", event.id, error);
        self.event_bus.emit(PurchaseFailed::new(
            event.id,
            user_id,
            ticket_count,
            error.to_string(),
        ));
        error
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::domain::Coordinates;
    use chrono::Utc;

    #[test]
    fn test_legal_transitions() {
        use PurchaseState::*;
        assert!(Idle.can_advance_to(TicketCountSelected));
        assert!(TicketCountSelected.can_advance_to(Validating));
        assert!(Validating.can_advance_to(CapacityReserved));
        assert!(Validating.can_advance_to(Failed));
        assert!(CapacityReserved.can_advance_to(ReservationPersisted));
        assert!(CapacityReserved.can_advance_to(Failed));
    }

    #[test]
    fn test_illegal_transitions() {
        use PurchaseState::*;
        assert!(!Idle.can_advance_to(CapacityReserved));
        assert!(!Idle.can_advance_to(Failed));
        assert!(!ReservationPersisted.can_advance_to(Failed));
        assert!(!Failed.can_advance_to(Validating));
        assert!(!CapacityReserved.can_advance_to(Validating));
    }

    #[test]
    fn test_terminal_states() {
        assert!(PurchaseState::ReservationPersisted.is_terminal());
        assert!(PurchaseState::Failed.is_terminal());
        assert!(!PurchaseState::Validating.is_terminal());
    }

    fn event_with_remaining(remaining: u32) -> Event {
        let mut event = Event::new(
            "Tribute to Didi Kempot".to_string(),
            "Memorial concert".to_string(),
            "Solo, Indonesia".to_string(),
            Utc::now(),
            100,
            Coordinates {
                latitude: -7.57,
                longitude: 110.82,
            },
            20.0,
        );
        event.tickets_remaining = remaining;
        event
    }

    #[test]
    fn test_selection_capped_at_ten() {
        let event = event_with_remaining(40);
        assert_eq!(selectable_tickets(&event), Some(1..=10));
    }

    #[test]
    fn test_selection_bounded_by_remaining() {
        let event = event_with_remaining(4);
        assert_eq!(selectable_tickets(&event), Some(1..=4));
    }

    #[test]
    fn test_selection_none_when_sold_out() {
        let event = event_with_remaining(0);
        assert_eq!(selectable_tickets(&event), None);
    }
}

use super::entity::Reservation;
use crate::domain::{DomainError, DomainResult};

/// Validates all Reservation invariants
pub fn validate_reservation(reservation: &Reservation) -> DomainResult<()> {
    if reservation.tickets < 1 {
        return Err(DomainError::InvariantViolation(
            "Reservation must cover at least one ticket".to_string(),
        ));
    }
    if !reservation.total_price.is_finite() || reservation.total_price < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Total price {} must be a non-negative number",
            reservation.total_price
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the Reservation domain:
///
/// 1. Identity (UUID) is immutable
/// 2. tickets >= 1
/// 3. total_price = tickets x event price at purchase time, non-negative
/// 4. Reservations are never updated or deleted by this core

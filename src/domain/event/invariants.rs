use super::entity::Event;
use crate::domain::{DomainError, DomainResult};

/// Validates all Event invariants
/// These are the absolute rules that must hold for an Event to be valid
pub fn validate_event(event: &Event) -> DomainResult<()> {
    validate_title(&event.title)?;
    validate_capacity(event)?;
    validate_price(event.ticket_price)?;
    validate_coordinates(event)?;
    Ok(())
}

/// Title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Event title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Remaining tickets can never exceed capacity
fn validate_capacity(event: &Event) -> DomainResult<()> {
    if event.tickets_remaining > event.capacity {
        return Err(DomainError::InvariantViolation(format!(
            "tickets_remaining {} exceeds capacity {}",
            event.tickets_remaining, event.capacity
        )));
    }
    Ok(())
}

/// Ticket price is non-negative
fn validate_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Ticket price {} must be a non-negative number",
            price
        )));
    }
    Ok(())
}

/// Coordinates must lie on the globe
fn validate_coordinates(event: &Event) -> DomainResult<()> {
    let c = event.coordinates;
    if !(-90.0..=90.0).contains(&c.latitude) || !(-180.0..=180.0).contains(&c.longitude) {
        return Err(DomainError::InvariantViolation(format!(
            "Coordinates ({}, {}) are out of range",
            c.latitude, c.longitude
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the Event domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Title cannot be empty
/// 3. 0 <= tickets_remaining <= capacity
/// 4. tickets_remaining only decreases within the purchase flow,
///    each decrease paired with exactly one reservation
/// 5. Ticket price is non-negative
/// 6. Coordinates are valid latitude/longitude

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::Coordinates;
    use chrono::Utc;

    fn sample_event() -> Event {
        Event::new(
            "Tomorrowland 2024".to_string(),
            "Electronic music festival".to_string(),
            "Boom, Belgium".to_string(),
            Utc::now(),
            100,
            Coordinates {
                latitude: 51.09,
                longitude: 4.37,
            },
            20.0,
        )
    }

    #[test]
    fn test_valid_event() {
        let event = sample_event();
        assert!(validate_event(&event).is_ok());
    }

    #[test]
    fn test_empty_title_fails() {
        let mut event = sample_event();
        event.title = "   ".to_string();
        assert!(validate_event(&event).is_err());
    }

    #[test]
    fn test_remaining_above_capacity_fails() {
        let mut event = sample_event();
        event.tickets_remaining = 101;
        assert!(validate_event(&event).is_err());
    }

    #[test]
    fn test_negative_price_fails() {
        let mut event = sample_event();
        event.ticket_price = -1.0;
        assert!(validate_event(&event).is_err());
    }

    #[test]
    fn test_out_of_range_coordinates_fail() {
        let mut event = sample_event();
        event.coordinates.latitude = 95.0;
        assert!(validate_event(&event).is_err());
    }

    #[test]
    fn test_new_event_starts_at_full_capacity() {
        let event = sample_event();
        assert_eq!(event.tickets_remaining, event.capacity);
        assert!(!event.is_sold_out());
    }
}

pub mod entity;
pub mod invariants;

pub use entity::Reservation;
pub use invariants::validate_reservation;

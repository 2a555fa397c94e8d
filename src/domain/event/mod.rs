pub mod entity;
pub mod invariants;

pub use entity::{Coordinates, Event};
pub use invariants::validate_event;

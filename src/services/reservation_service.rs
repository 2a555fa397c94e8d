// src/services/reservation_service.rs
//
// Read side of reservations (the ticket wallet and ticket detail
// screens). Writing goes through the purchase workflow only.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Reservation;
use crate::error::AppResult;
use crate::repositories::ReservationRepository;

pub struct ReservationService {
    reservation_repo: Arc<dyn ReservationRepository>,
}

impl ReservationService {
    pub fn new(reservation_repo: Arc<dyn ReservationRepository>) -> Self {
        Self { reservation_repo }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Reservation>> {
        self.reservation_repo.list_for_user(user_id).await
    }

    pub async fn get_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Reservation>> {
        self.reservation_repo.get(reservation_id).await
    }
}

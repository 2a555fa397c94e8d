// src/repositories/reservation_repository.rs
//
// Reservation persistence over the `reservation` table.
//
// No operation here validates ticket counts against the referenced
// event; that is the purchase workflow's responsibility.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Reservation;
use crate::error::AppResult;
use crate::gateway::GatewayClient;

const TABLE: &str = "reservation";
const KEY_COLUMN: &str = "reservationid";
const USER_COLUMN: &str = "userid";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: &Reservation) -> AppResult<()>;
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Reservation>>;
    async fn get(&self, id: Uuid) -> AppResult<Option<Reservation>>;
}

/// Row shape of the `reservation` table
#[derive(Debug, Serialize, Deserialize)]
struct ReservationRow {
    reservationid: Uuid,
    userid: Uuid,
    eventid: Uuid,
    tickets: u32,
    totalprice: f64,
    timestamp: DateTime<Utc>,
}

impl ReservationRow {
    fn into_reservation(self) -> Reservation {
        Reservation {
            id: self.reservationid,
            user_id: self.userid,
            event_id: self.eventid,
            tickets: self.tickets,
            total_price: self.totalprice,
            timestamp: self.timestamp,
        }
    }

    fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            reservationid: reservation.id,
            userid: reservation.user_id,
            eventid: reservation.event_id,
            tickets: reservation.tickets,
            totalprice: reservation.total_price,
            timestamp: reservation.timestamp,
        }
    }
}

pub struct RestReservationRepository {
    gateway: Arc<GatewayClient>,
}

impl RestReservationRepository {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ReservationRepository for RestReservationRepository {
    async fn create(&self, reservation: &Reservation) -> AppResult<()> {
        self.gateway
            .insert(TABLE, &ReservationRow::from_reservation(reservation))
            .await
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = self
            .gateway
            .select_by(TABLE, USER_COLUMN, &user_id.to_string())
            .await?;
        Ok(rows
            .into_iter()
            .map(ReservationRow::into_reservation)
            .collect())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = self
            .gateway
            .select_one(TABLE, KEY_COLUMN, &id.to_string())
            .await?;
        Ok(row.map(ReservationRow::into_reservation))
    }
}

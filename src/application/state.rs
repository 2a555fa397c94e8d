// src/application/state.rs

use std::sync::Arc;

use crate::error::AppResult;
use crate::events::{create_event_bus, register_notification_handlers, EventBus};
use crate::gateway::{GatewayClient, GatewayConfig};
use crate::repositories::{
    EventRepository, NotificationRepository, ReservationRepository, RestEventRepository,
    RestNotificationRepository, RestReservationRepository,
};
use crate::services::{AuthService, EventService, PurchaseService, ReservationService};

/// Application state handed to the presentation layer.
/// All fields are Arc-wrapped for thread-safe sharing across screens.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub auth_service: Arc<AuthService>,
    pub event_service: Arc<EventService>,
    pub reservation_service: Arc<ReservationService>,
    pub purchase_service: Arc<PurchaseService>,
}

impl AppState {
    /// Wire the full stack against a backend project: gateway client,
    /// repositories, services, and the notification handler.
    pub fn initialize(config: GatewayConfig) -> AppResult<Self> {
        let gateway = Arc::new(GatewayClient::new(config)?);
        let event_bus = Arc::new(create_event_bus());

        let event_repo: Arc<dyn EventRepository> =
            Arc::new(RestEventRepository::new(Arc::clone(&gateway)));
        let reservation_repo: Arc<dyn ReservationRepository> =
            Arc::new(RestReservationRepository::new(Arc::clone(&gateway)));
        let notification_repo: Arc<dyn NotificationRepository> =
            Arc::new(RestNotificationRepository::new(Arc::clone(&gateway)));

        register_notification_handlers(&event_bus, notification_repo);

        Ok(Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&gateway),
                Arc::clone(&event_bus),
            )),
            event_service: Arc::new(EventService::new(
                Arc::clone(&event_repo),
                Arc::clone(&event_bus),
            )),
            reservation_service: Arc::new(ReservationService::new(Arc::clone(&reservation_repo))),
            purchase_service: Arc::new(PurchaseService::new(
                event_repo,
                reservation_repo,
                Arc::clone(&event_bus),
            )),
            event_bus,
        })
    }
}

// src/events/handlers/notification_handler.rs
//
// Bridges the event bus to the notification store: every completed
// purchase leaves a confirmation notification for the buyer.
//
// CRITICAL RULES:
// - Only consumes PurchaseCompleted events
// - Persistence runs on a spawned task; the purchase path never waits
//   on it and never sees its errors
// - Handler failures are logged, not propagated

use std::sync::Arc;

use crate::domain::Notification;
use crate::events::types::PurchaseCompleted;
use crate::events::EventBus;
use crate::repositories::NotificationRepository;

/// Registers all notification handlers with the event bus
pub fn register_notification_handlers(
    bus: &EventBus,
    repository: Arc<dyn NotificationRepository>,
) {
    bus.subscribe::<PurchaseCompleted, _>(move |event| {
        handle_purchase_completed(Arc::clone(&repository), event);
    });

    log::info!("Notification handlers registered");
}

fn handle_purchase_completed(repository: Arc<dyn NotificationRepository>, event: &PurchaseCompleted) {
    let notification = Notification::new(
        event.user_id,
        confirmation_message(&event.event_title, event.tickets, event.total_price),
    );

    // The bus is synchronous; repository I/O is not. Hand the write to
    // the runtime and surface failures through the log only.
    tokio::spawn(async move {
        if let Err(e) = repository.create(&notification).await {
            log::error!(
                "Failed to store purchase notification for user {}: {}",
                notification.user_id,
                e
            );
        }
    });
}

fn confirmation_message(event_title: &str, tickets: u32, total_price: f64) -> String {
    format!(
        "You reserved {} ticket{} for {} (${})",
        tickets,
        if tickets == 1 { "" } else { "s" },
        event_title,
        total_price
    )
}

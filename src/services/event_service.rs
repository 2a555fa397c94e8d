// src/services/event_service.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{validate_event, Coordinates, Event};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, EventCreated, EventUpdated};
use crate::repositories::{EventPatch, EventRepository};

#[derive(Debug, Clone)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub capacity: u32,
    pub coordinates: Coordinates,
    pub ticket_price: f64,
}

pub struct EventService {
    event_repo: Arc<dyn EventRepository>,
    event_bus: Arc<EventBus>,
}

impl EventService {
    pub fn new(event_repo: Arc<dyn EventRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            event_repo,
            event_bus,
        }
    }

    /// Create an organizer event, starting at full capacity
    pub async fn create_event(&self, request: CreateEventRequest) -> AppResult<Uuid> {
        let event = Event::new(
            request.title,
            request.description,
            request.location,
            request.date,
            request.capacity,
            request.coordinates,
            request.ticket_price,
        );

        validate_event(&event).map_err(AppError::Domain)?;
        self.event_repo.create(&event).await?;

        self.event_bus
            .emit(EventCreated::new(event.id, event.title.clone()));

        Ok(event.id)
    }

    pub async fn update_event(&self, event_id: Uuid, patch: EventPatch) -> AppResult<()> {
        // Reject patches against unknown ids before touching the table
        self.event_repo
            .get(event_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.event_repo.update(event_id, patch).await?;
        self.event_bus.emit(EventUpdated::new(event_id));
        Ok(())
    }

    pub async fn get_event(&self, event_id: Uuid) -> AppResult<Option<Event>> {
        self.event_repo.get(event_id).await
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.event_repo.list().await
    }

    /// Case-insensitive title search over the full listing.
    /// The list screens filter client-side; the table has no
    /// search endpoint.
    pub async fn search_events(&self, term: &str) -> AppResult<Vec<Event>> {
        let needle = term.to_lowercase();
        let events = self.event_repo.list().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn delete_event(&self, event_id: Uuid) -> AppResult<()> {
        self.event_repo.delete(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::event_repository::MockEventRepository;
    use mockall::predicate::eq;

    fn event(title: &str) -> Event {
        Event::new(
            title.to_string(),
            "Live show".to_string(),
            "Jakarta, Indonesia".to_string(),
            Utc::now(),
            100,
            Coordinates {
                latitude: -6.2,
                longitude: 106.8,
            },
            20.0,
        )
    }

    fn catalog() -> Vec<Event> {
        vec![
            event("Tomorrowland 2024"),
            event("Coldplay Live Concert"),
            event("Jazz Evening"),
        ]
    }

    fn service(repo: MockEventRepository) -> EventService {
        EventService::new(Arc::new(repo), Arc::new(EventBus::new()))
    }

    #[tokio::test]
    async fn test_search_matches_case_insensitively() {
        let mut repo = MockEventRepository::new();
        repo.expect_list().returning(|| Ok(catalog()));

        let hits = service(repo).search_events("COLDplay").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Coldplay Live Concert");
    }

    #[tokio::test]
    async fn test_search_matches_substrings() {
        let mut repo = MockEventRepository::new();
        repo.expect_list().returning(|| Ok(catalog()));

        let hits = service(repo).search_events("land").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Tomorrowland 2024");
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty() {
        let mut repo = MockEventRepository::new();
        repo.expect_list().returning(|| Ok(catalog()));

        let hits = service(repo).search_events("metallica").await.unwrap();

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_delete_forwards_the_id() {
        let event_id = Uuid::new_v4();
        let mut repo = MockEventRepository::new();
        repo.expect_delete()
            .with(eq(event_id))
            .times(1)
            .returning(|_| Ok(()));

        service(repo).delete_event(event_id).await.unwrap();
    }
}

//! Lobby synchronizer: pull-based cached view of room summaries.
//!
//! Listing is the hottest read path (clients poll it to populate the room
//! selection view), so [`LobbySynchronizer`] keeps a cached projection and
//! rebuilds it only when a mutation has happened since the last refresh.
//! Invalidation rides the event bus: every registry/room mutation publishes
//! a [`RoomEvent`](crate::domain::RoomEvent), and `refresh` drains its
//! receiver before deciding whether the cache is still valid. A lagged
//! receiver counts as dirty; correctness never depends on seeing every
//! event, only on seeing *that* something happened.

use std::sync::Arc;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, Mutex};

use crate::domain::{EventBus, RoomEvent, RoomRegistry, RoomSummary};

/// Cached, on-demand view of all room summaries.
#[derive(Debug)]
pub struct LobbySynchronizer {
    registry: Arc<RoomRegistry>,
    invalidation: Mutex<broadcast::Receiver<RoomEvent>>,
    cache: Mutex<Option<Vec<RoomSummary>>>,
}

impl LobbySynchronizer {
    /// Creates a synchronizer subscribed to the given bus.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>, bus: &EventBus) -> Self {
        Self {
            registry,
            invalidation: Mutex::new(bus.subscribe()),
            cache: Mutex::new(None),
        }
    }

    /// Returns a fresh snapshot of room summaries.
    ///
    /// Serves the cached projection when no mutation has been observed
    /// since it was built; rebuilds from the registry otherwise. Individual
    /// room errors cannot occur mid-snapshot: a room removed concurrently
    /// is simply absent from the next rebuild.
    pub async fn refresh(&self) -> Vec<RoomSummary> {
        let mut dirty = false;
        {
            let mut rx = self.invalidation.lock().await;
            loop {
                match rx.try_recv() {
                    Ok(_) | Err(TryRecvError::Lagged(_)) => dirty = true,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                }
            }
        }

        let mut cache = self.cache.lock().await;
        if dirty || cache.is_none() {
            *cache = Some(self.registry.list_summaries().await);
        }
        cache.clone().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::provider::stub::StubDeckProvider;
    use crate::provider::DeckProvider;
    use crate::service::RoomService;
    use crate::session::SessionIssuer;

    fn make_world() -> (RoomService, LobbySynchronizer) {
        let registry = Arc::new(RoomRegistry::new());
        let bus = EventBus::new(100);
        let service = RoomService::new(
            Arc::clone(&registry),
            SessionIssuer::new(),
            Arc::new(StubDeckProvider::new()) as Arc<dyn DeckProvider>,
            bus.clone(),
            4,
        );
        let lobby = LobbySynchronizer::new(registry, &bus);
        (service, lobby)
    }

    #[tokio::test]
    async fn empty_registry_yields_empty_listing() {
        let (_service, lobby) = make_world();
        assert!(lobby.refresh().await.is_empty());
    }

    #[tokio::test]
    async fn refresh_reflects_created_rooms() {
        let (service, lobby) = make_world();
        let _ = service.create_room("Game Night", "Alice").await.unwrap();

        let summaries = lobby.refresh().await;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries.first().map(|s| s.host.as_str()), Some("Alice"));
    }

    #[tokio::test]
    async fn cache_invalidates_on_join() {
        let (service, lobby) = make_world();
        let created = service.create_room("Game Night", "Alice").await.unwrap();

        // Prime the cache with a single-player summary.
        let before = lobby.refresh().await;
        assert_eq!(before.first().map(|s| s.num_players), Some(1));

        let _ = service.join_room(&created.room_id, "Bob").await.unwrap();

        // The join published an event, so the next refresh rebuilds.
        let after = lobby.refresh().await;
        assert_eq!(after.first().map(|s| s.num_players), Some(2));
    }

    #[tokio::test]
    async fn removed_rooms_disappear_from_next_snapshot() {
        let (service, lobby) = make_world();
        let created = service.create_room("Game Night", "Alice").await.unwrap();
        assert_eq!(lobby.refresh().await.len(), 1);

        service.close_room(&created.room_id).await.unwrap();
        assert!(lobby.refresh().await.is_empty());
    }

    #[tokio::test]
    async fn unchanged_registry_serves_cached_snapshot() {
        let (service, lobby) = make_world();
        let _ = service.create_room("Game Night", "Alice").await.unwrap();

        let first = lobby.refresh().await;
        let second = lobby.refresh().await;
        assert_eq!(first.len(), second.len());
        assert_eq!(
            first.first().map(|s| s.id.clone()),
            second.first().map(|s| s.id.clone())
        );
    }
}

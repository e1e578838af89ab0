//! Concurrent room storage with per-room fine-grained locking.
//!
//! [`RoomRegistry`] stores all active rooms in a `HashMap` where each entry
//! is individually protected by a [`tokio::sync::RwLock`]. This allows
//! concurrent reads on the same room and concurrent writes on different
//! rooms.
//!
//! State is volatile: the registry is constructed at service start and lost
//! on process exit. There is no persistence layer.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;

use super::ids::MAX_GENERATION_ATTEMPTS;
use super::room::{Room, RoomSummary};
use super::RoomId;
use crate::error::LobbyError;

/// Central store for all active game rooms.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<Room>>` for fine-grained per-room locking.
///
/// # Concurrency
///
/// - Multiple tasks may read the same room concurrently.
/// - Writes to different rooms are concurrent.
/// - Writes to the same room are serialized.
/// - Id generation and insertion happen under one outer write lock, so two
///   concurrent creations can never claim the same id.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Arc<RwLock<Room>>>>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Generates a free room id and inserts the room built by `build`,
    /// atomically with respect to concurrent creations.
    ///
    /// Id candidates are drawn at random and checked against live rooms;
    /// after [`MAX_GENERATION_ATTEMPTS`] collisions the operation fails
    /// rather than looping unboundedly.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::IdSpaceExhausted`] if no free id was found
    /// within the retry bound, or whatever error `build` reports.
    pub async fn create_with<F>(&self, build: F) -> Result<Arc<RwLock<Room>>, LobbyError>
    where
        F: FnOnce(RoomId) -> Result<Room, LobbyError>,
    {
        let mut map = self.rooms.write().await;

        let mut candidate = None;
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let id = RoomId::generate();
            if !map.contains_key(&id) {
                candidate = Some(id);
                break;
            }
        }
        let room_id = candidate.ok_or(LobbyError::IdSpaceExhausted)?;

        let room = build(room_id.clone())?;
        let entry = Arc::new(RwLock::new(room));
        map.insert(room_id, Arc::clone(&entry));
        Ok(entry)
    }

    /// Returns a shared reference to the room behind its per-room lock.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RoomNotFound`] if no room with the given id
    /// exists.
    pub async fn get(&self, room_id: &RoomId) -> Result<Arc<RwLock<Room>>, LobbyError> {
        let map = self.rooms.read().await;
        map.get(room_id)
            .cloned()
            .ok_or_else(|| LobbyError::RoomNotFound(room_id.clone()))
    }

    /// Removes a room from the registry, returning its entry.
    ///
    /// In-flight operations holding the entry's `Arc` complete against the
    /// detached room; their effects are simply no longer observable.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RoomNotFound`] if no room with the given id
    /// exists.
    pub async fn remove(&self, room_id: &RoomId) -> Result<Arc<RwLock<Room>>, LobbyError> {
        let mut map = self.rooms.write().await;
        map.remove(room_id)
            .ok_or_else(|| LobbyError::RoomNotFound(room_id.clone()))
    }

    /// Returns summaries of all rooms.
    ///
    /// The snapshot is consistent (no partially-constructed room is ever
    /// visible) but the iteration order of the underlying keyed store is
    /// unspecified; callers must sort if they need ordering.
    pub async fn list_summaries(&self) -> Vec<RoomSummary> {
        let map = self.rooms.read().await;
        let mut summaries = Vec::with_capacity(map.len());
        for entry in map.values() {
            let room = entry.read().await;
            summaries.push(RoomSummary::from(&*room));
        }
        summaries
    }

    /// Removes every room idle longer than `ttl`, returning summaries of
    /// what was reclaimed.
    pub async fn sweep_expired(&self, ttl: Duration) -> Vec<RoomSummary> {
        let mut map = self.rooms.write().await;
        let mut expired = Vec::new();
        for (id, entry) in map.iter() {
            let room = entry.read().await;
            if room.is_expired(ttl) {
                expired.push((id.clone(), RoomSummary::from(&*room)));
            }
        }
        let mut removed = Vec::with_capacity(expired.len());
        for (id, summary) in expired {
            map.remove(&id);
            removed.push(summary);
        }
        removed
    }

    /// Returns the number of rooms in the registry.
    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Returns `true` if the registry contains no rooms.
    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

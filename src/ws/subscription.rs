//! Per-connection subscription manager.
//!
//! Tracks which room ids a WebSocket client is subscribed to and provides
//! server-side event filtering.

use std::collections::HashSet;

use crate::domain::RoomId;

/// Manages the set of room subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed room ids. If `subscribe_all` is true, this set is ignored.
    room_ids: HashSet<RoomId>,
    /// Whether the client subscribes to all rooms (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds room ids to the subscription set. `wildcard` enables match-all.
    pub fn subscribe(&mut self, ids: &[RoomId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for id in ids {
            self.room_ids.insert(id.clone());
        }
    }

    /// Removes room ids from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[RoomId]) {
        for id in ids {
            self.room_ids.remove(id);
        }
    }

    /// Returns `true` if the given room id matches the subscription filter.
    #[must_use]
    pub fn matches(&self, room_id: &RoomId) -> bool {
        self.subscribe_all || self.room_ids.contains(room_id)
    }

    /// Returns the number of explicitly subscribed room ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.room_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(&RoomId::generate()));
    }

    #[test]
    fn subscribe_specific_room() {
        let mut mgr = SubscriptionManager::new();
        let id = RoomId::generate();
        mgr.subscribe(std::slice::from_ref(&id), false);
        assert!(mgr.matches(&id));
        assert!(!mgr.matches(&RoomId::from("zzzz")));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(&RoomId::generate()));
        assert!(mgr.matches(&RoomId::generate()));
    }

    #[test]
    fn unsubscribe_removes_room() {
        let mut mgr = SubscriptionManager::new();
        let id = RoomId::generate();
        mgr.subscribe(std::slice::from_ref(&id), false);
        assert!(mgr.matches(&id));
        mgr.unsubscribe(std::slice::from_ref(&id));
        assert!(!mgr.matches(&id));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(&[RoomId::from("aaaa"), RoomId::from("bbbb")], false);
        assert_eq!(mgr.count(), 2);
    }
}

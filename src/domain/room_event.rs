//! Domain events reflecting room state mutations.
//!
//! Every mutation publishes a [`RoomEvent`] through the [`super::EventBus`].
//! Events are broadcast to WebSocket subscribers and drained by the lobby
//! synchronizer to invalidate its cached summaries.
//!
//! Events carry display names only. A `PlayerId` doubles as the bearer proof
//! of membership, so it must never appear in a payload that fans out to
//! every subscriber of a room.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RoomId;

/// Why a room was removed from the registry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Removed by an explicit delete request.
    Deleted,
    /// Reclaimed by the idle-room expiry sweep.
    Expired,
}

/// Domain event emitted after every state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RoomEvent {
    /// Emitted when a new room is created.
    RoomCreated {
        /// Room identifier.
        room_id: RoomId,
        /// Host-supplied room name.
        room_name: String,
        /// Host display name.
        host_name: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a player joins a room.
    PlayerJoined {
        /// Room identifier.
        room_id: RoomId,
        /// Display name of the joining player.
        player_name: String,
        /// Member count after the join.
        num_players: usize,
        /// Join timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the room's deck is (re)shuffled.
    DeckShuffled {
        /// Room identifier.
        room_id: RoomId,
        /// Undealt cards in the fresh deck.
        remaining: u32,
        /// Shuffle timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a successful draw.
    CardsDrawn {
        /// Room identifier.
        room_id: RoomId,
        /// Display name of the drawing player.
        player_name: String,
        /// Number of cards actually dealt.
        count: usize,
        /// Undealt cards after the draw.
        remaining: u32,
        /// Draw timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a player reorders their pile.
    PileReordered {
        /// Room identifier.
        room_id: RoomId,
        /// Display name of the pile owner.
        player_name: String,
        /// Pile size (unchanged by the reorder).
        pile_size: usize,
        /// Reorder timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a room is removed.
    RoomClosed {
        /// Room identifier.
        room_id: RoomId,
        /// Removal cause.
        reason: CloseReason,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl RoomEvent {
    /// Returns the room this event concerns. Used for subscription filtering.
    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        match self {
            Self::RoomCreated { room_id, .. }
            | Self::PlayerJoined { room_id, .. }
            | Self::DeckShuffled { room_id, .. }
            | Self::CardsDrawn { room_id, .. }
            | Self::PileReordered { room_id, .. }
            | Self::RoomClosed { room_id, .. } => room_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn room_id_accessor_covers_all_variants() {
        let id = RoomId::from("r1");
        let events = vec![
            RoomEvent::RoomCreated {
                room_id: id.clone(),
                room_name: "Game Night".to_string(),
                host_name: "Alice".to_string(),
                timestamp: Utc::now(),
            },
            RoomEvent::PlayerJoined {
                room_id: id.clone(),
                player_name: "Bob".to_string(),
                num_players: 2,
                timestamp: Utc::now(),
            },
            RoomEvent::RoomClosed {
                room_id: id.clone(),
                reason: CloseReason::Expired,
                timestamp: Utc::now(),
            },
        ];
        for event in &events {
            assert_eq!(event.room_id(), &id);
        }
    }

    #[test]
    fn serializes_with_event_type_tag() {
        let event = RoomEvent::DeckShuffled {
            room_id: RoomId::from("r1"),
            remaining: 52,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json.get("event_type").and_then(|v| v.as_str()), Some("deck_shuffled"));
        assert_eq!(json.get("remaining").and_then(serde_json::Value::as_u64), Some(52));
    }
}

//! Room aggregate: membership, deck reference, and listing projection.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::deck::DeckState;
use super::{PlayerId, RoomId};

/// Binding between an opaque player identifier and a room membership.
///
/// One session per `(room_id, player_id)`. Player names are display-only and
/// not required to be unique; the id is the identity.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    /// Opaque per-room player identifier.
    pub player_id: PlayerId,
    /// Display name supplied at join time (non-empty).
    pub player_name: String,
    /// Room this session is bound to.
    pub room_id: RoomId,
    /// When the player joined.
    pub joined_at: DateTime<Utc>,
}

/// A single game's authoritative state.
///
/// Invariants: `host_player_id` is always present in `players`; `players` is
/// non-empty once the room exists; `id` is immutable after creation.
#[derive(Debug)]
pub struct Room {
    /// Unique room identifier (immutable).
    pub id: RoomId,
    /// Host-supplied display name.
    pub name: String,
    /// Player id of the host (always a member).
    pub host_player_id: PlayerId,
    /// Members in join order; the host is first.
    pub players: Vec<PlayerSession>,
    /// Deck state, absent until the first shuffle.
    pub deck: Option<DeckState>,
    /// Creation timestamp (immutable).
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation, used for idle-room expiry.
    pub last_action_at: DateTime<Utc>,
}

impl Room {
    /// Creates a room with the given host as its only member.
    #[must_use]
    pub fn new(id: RoomId, name: String, host: PlayerSession) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            host_player_id: host.player_id.clone(),
            players: vec![host],
            deck: None,
            created_at: now,
            last_action_at: now,
        }
    }

    /// Returns the session for the given player id, if they are a member.
    #[must_use]
    pub fn member(&self, player_id: &PlayerId) -> Option<&PlayerSession> {
        self.players.iter().find(|p| &p.player_id == player_id)
    }

    /// Returns `true` if the given player id is a member of this room.
    #[must_use]
    pub fn is_member(&self, player_id: &PlayerId) -> bool {
        self.member(player_id).is_some()
    }

    /// Number of members.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Display name of the host.
    #[must_use]
    pub fn host_name(&self) -> &str {
        self.member(&self.host_player_id)
            .map_or("", |p| p.player_name.as_str())
    }

    /// Appends a member and stamps the activity clock.
    pub fn add_player(&mut self, session: PlayerSession) {
        self.players.push(session);
        self.touch();
    }

    /// Stamps the activity clock. Called on every successful mutation.
    pub fn touch(&mut self) {
        self.last_action_at = Utc::now();
    }

    /// Returns `true` if the room has been idle longer than `ttl`.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now().signed_duration_since(self.last_action_at) >= ttl
    }
}

/// Read-only projection of a [`Room`] for listing.
///
/// Recomputed on every lobby refresh; never stored independently of the
/// room it projects, so it can go stale but never drift.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    /// Room identifier.
    pub id: RoomId,
    /// Room display name.
    pub name: String,
    /// Host display name (not the host's id).
    pub host: String,
    /// Current member count.
    pub num_players: usize,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            host: room.host_name().to_string(),
            num_players: room.num_players(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn session(room_id: &RoomId, player_id: &str, name: &str) -> PlayerSession {
        PlayerSession {
            player_id: PlayerId::from(player_id),
            player_name: name.to_string(),
            room_id: room_id.clone(),
            joined_at: Utc::now(),
        }
    }

    fn game_night() -> Room {
        let id = RoomId::from("r1");
        let host = session(&id, "alice1", "Alice");
        Room::new(id, "Game Night".to_string(), host)
    }

    #[test]
    fn new_room_contains_host() {
        let room = game_night();
        let host_id = room.host_player_id.clone();
        assert_eq!(room.num_players(), 1);
        assert!(room.is_member(&host_id));
        assert_eq!(room.host_name(), "Alice");
        assert!(room.deck.is_none());
    }

    #[test]
    fn add_player_preserves_join_order() {
        let mut room = game_night();
        let id = room.id.clone();
        room.add_player(session(&id, "bob222", "Bob"));
        room.add_player(session(&id, "carol3", "Carol"));

        let names: Vec<&str> = room.players.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn non_member_is_rejected() {
        let room = game_night();
        assert!(!room.is_member(&PlayerId::from("eve666")));
    }

    #[test]
    fn summary_projects_host_name_and_count() {
        let mut room = game_night();
        let id = room.id.clone();
        room.add_player(session(&id, "bob222", "Bob"));

        let summary = RoomSummary::from(&room);
        assert_eq!(summary.id, room.id);
        assert_eq!(summary.name, "Game Night");
        assert_eq!(summary.host, "Alice");
        assert_eq!(summary.num_players, 2);
    }

    #[test]
    fn expiry_tracks_last_action() {
        let room = game_night();
        assert!(!room.is_expired(Duration::minutes(30)));
        assert!(room.is_expired(Duration::zero()));
    }
}

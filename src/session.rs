//! Session issuance and validation.
//!
//! [`SessionIssuer`] mints the opaque per-room player identifiers handed to
//! clients and re-checks them on every room-scoped request. The pair
//! `(player_id, player_name)` travels to the client as two independent
//! opaque values; there is no server-side session store beyond the room's
//! player list, so the id itself is the proof of membership and must be
//! validated before any deck mutation.

use chrono::Utc;

use crate::domain::ids::MAX_GENERATION_ATTEMPTS;
use crate::domain::{PlayerId, PlayerSession, Room, RoomId};
use crate::error::LobbyError;

/// Mints and validates opaque player identifiers bound to a room.
#[derive(Debug, Clone, Default)]
pub struct SessionIssuer;

impl SessionIssuer {
    /// Creates a new issuer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Mints a session for `player_name` in the given room.
    ///
    /// The generated player id is guaranteed distinct from every id in
    /// `existing`. The caller is responsible for appending the session to
    /// the room's player list while still holding the room's write lock, so
    /// issuance and insertion stay atomic.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::InvalidPlayerName`] if the name is empty or
    /// blank, or [`LobbyError::IdSpaceExhausted`] if id generation retries
    /// run out.
    pub fn issue(
        &self,
        room_id: &RoomId,
        existing: &[PlayerSession],
        player_name: &str,
    ) -> Result<PlayerSession, LobbyError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(LobbyError::InvalidPlayerName);
        }

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let player_id = PlayerId::generate();
            if !existing.iter().any(|p| p.player_id == player_id) {
                return Ok(PlayerSession {
                    player_id,
                    player_name: name.to_string(),
                    room_id: room_id.clone(),
                    joined_at: Utc::now(),
                });
            }
        }
        Err(LobbyError::IdSpaceExhausted)
    }

    /// Returns `true` iff `player_id` appears in the room's player list.
    ///
    /// This is the only authorization boundary in the system: a spoofed id
    /// from an unrelated room fails here before any deck state is touched.
    #[must_use]
    pub fn validate(&self, room: &Room, player_id: &PlayerId) -> bool {
        room.is_member(player_id)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn issue(issuer: &SessionIssuer, name: &str) -> Result<PlayerSession, LobbyError> {
        issuer.issue(&RoomId::from("r1"), &[], name)
    }

    #[test]
    fn issues_session_with_trimmed_name() {
        let issuer = SessionIssuer::new();
        let result = issue(&issuer, "  Alice  ");
        let Ok(session) = result else {
            panic!("issue failed");
        };
        assert_eq!(session.player_name, "Alice");
        assert_eq!(session.room_id, RoomId::from("r1"));
        assert_eq!(session.player_id.as_str().len(), 6);
    }

    #[test]
    fn rejects_blank_names() {
        let issuer = SessionIssuer::new();
        assert!(matches!(
            issue(&issuer, ""),
            Err(LobbyError::InvalidPlayerName)
        ));
        assert!(matches!(
            issue(&issuer, "   "),
            Err(LobbyError::InvalidPlayerName)
        ));
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let issuer = SessionIssuer::new();
        let room_id = RoomId::from("r1");
        let Ok(first) = issuer.issue(&room_id, &[], "Alice") else {
            panic!("first issue failed");
        };
        let Ok(second) = issuer.issue(&room_id, std::slice::from_ref(&first), "Alice") else {
            panic!("second issue failed");
        };
        assert_eq!(first.player_name, second.player_name);
        assert_ne!(first.player_id, second.player_id);
    }

    #[test]
    fn validate_accepts_members_and_rejects_strangers() {
        let issuer = SessionIssuer::new();
        let room_id = RoomId::from("r1");
        let Ok(host) = issuer.issue(&room_id, &[], "Alice") else {
            panic!("issue failed");
        };
        let host_id = host.player_id.clone();
        let room = Room::new(room_id, "Game Night".to_string(), host);

        assert!(issuer.validate(&room, &host_id));
        assert!(!issuer.validate(&room, &PlayerId::from("eve666")));
    }
}

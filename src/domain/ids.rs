//! Type-safe room and player identifiers.
//!
//! Both identifiers are short fixed-length lowercase-alphanumeric strings,
//! matching the original lobby's wire format. They are *not* UUIDs: room ids
//! must stay typeable (shared verbally between players), so uniqueness is
//! enforced by collision-checking against live state at generation time
//! rather than by entropy alone.

use std::fmt;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Character set used for generated identifiers.
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated room id.
pub const ROOM_ID_LEN: usize = 4;

/// Length of a generated player id.
pub const PLAYER_ID_LEN: usize = 6;

/// Upper bound on collision-retry loops when generating an identifier that
/// must be unique within some live set. Generation fails rather than looping
/// unboundedly once this many candidates have collided.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Returns a random lowercase-alphanumeric string of the given length.
#[must_use]
pub fn random_lower_alnum(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(ID_ALPHABET.choose(&mut rng).copied().unwrap_or(b'0')))
        .collect()
}

/// Unique identifier for a game room.
///
/// Generated once at room creation (collision-checked against the registry)
/// and immutable thereafter. Used as the dictionary key in
/// [`super::RoomRegistry`], event discriminator, and WebSocket subscription
/// target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Generates a new random candidate room id.
    ///
    /// The caller is responsible for checking the candidate against live
    /// rooms; see [`super::RoomRegistry`].
    #[must_use]
    pub fn generate() -> Self {
        Self(random_lower_alnum(ROOM_ID_LEN))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier for a player within one room.
///
/// Minted by the session issuer on create/join and handed to the client,
/// which presents it on every subsequent room-scoped request. The id doubles
/// as the proof of membership, so it never appears in broadcast events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Generates a new random candidate player id.
    #[must_use]
    pub fn generate() -> Self {
        Self(random_lower_alnum(PLAYER_ID_LEN))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

//! Room-related DTOs for create, join, get, and list operations.
//!
//! Ids cross the wire as plain strings; the handlers convert to and from
//! the typed domain ids at the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::deck_dto::DeckStatusDto;
use crate::domain::RoomSummary;

/// Request body for `POST /rooms`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    /// Display name for the new room. May be empty.
    #[serde(default)]
    pub room_name: String,
    /// Display name of the host (must be non-blank).
    pub host_name: String,
}

/// Payload of a successful `POST /rooms` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRoomData {
    /// Generated room id.
    pub room_id: String,
    /// Room name as stored.
    pub room_name: String,
    /// The host's opaque player id. Keep it private; it proves membership.
    pub host_id: String,
    /// Host display name as stored.
    pub host_name: String,
}

/// Request body for `POST /rooms/{id}/join`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinRoomRequest {
    /// Display name of the joining player (must be non-blank).
    pub player_name: String,
}

/// Payload of a successful join.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinRoomData {
    /// Room id echoed from the path.
    pub room_id: String,
    /// Room display name.
    pub room_name: String,
    /// The joining player's opaque id. Keep it private; it proves membership.
    pub player_id: String,
    /// Player display name as stored.
    pub player_name: String,
}

/// Room summary for the lobby listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomSummaryDto {
    /// Room identifier.
    pub id: String,
    /// Room display name.
    pub name: String,
    /// Host display name.
    pub host: String,
    /// Current member count.
    #[serde(rename = "numPlayers")]
    pub num_players: usize,
}

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            host: summary.host,
            num_players: summary.num_players,
        }
    }
}

/// Full room detail for `GET /rooms/{id}`.
///
/// Exposes display names only; member player ids never leave the server
/// except to their owners at issuance time.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDetailData {
    /// Room identifier.
    pub id: String,
    /// Room display name.
    pub name: String,
    /// Host display name.
    pub host: String,
    /// Member display names in join order.
    pub players: Vec<String>,
    /// Current member count.
    #[serde(rename = "numPlayers")]
    pub num_players: usize,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Deck status, absent until the first shuffle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck: Option<DeckStatusDto>,
}

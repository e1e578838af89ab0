//! Lobby error types with HTTP status code mapping.
//!
//! [`LobbyError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//!
//! Client-error classes (`NotFound`, `InvalidInput`, `Unauthorized`) are
//! surfaced immediately and are never worth retrying. Upstream failures are
//! the only retryable class: the service itself does not retry, but every
//! provider failure leaves local state unchanged, so a caller-level retry is
//! always safe.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RoomId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "room not found: xk3f",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges below).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                 |
/// |-----------|-------------------|-----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request             |
/// | 2000–2099 | Not Found         | 404 Not Found               |
/// | 2100–2199 | Authorization     | 403 Forbidden               |
/// | 3000–3999 | Server            | 500 / 503                   |
/// | 4000–4999 | Room/Deck State   | 409 Conflict / 422          |
/// | 5000–5999 | Upstream Provider | 502 Bad Gateway / 504       |
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// Room with the given id was not found.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The room exists but has no deck yet (never shuffled).
    #[error("room {0} has no deck; shuffle first")]
    DeckNotReady(RoomId),

    /// The presented player id is not a member of the room.
    #[error("player is not a member of room {room_id}")]
    Unauthorized {
        /// Room the operation targeted.
        room_id: RoomId,
    },

    /// Player name was empty or blank.
    #[error("player name must not be empty")]
    InvalidPlayerName,

    /// A draw of zero cards was requested.
    #[error("draw count must be at least 1")]
    InvalidDrawCount,

    /// Pile index outside the valid range.
    #[error("index {index} out of range for pile of length {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Pile length at the time of the request.
        len: usize,
    },

    /// The room is at its configured player capacity.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// Draw request exceeds the undealt cards of the current deck.
    #[error("cannot draw {requested} cards; only {remaining} remaining")]
    InsufficientCards {
        /// Cards requested.
        requested: u32,
        /// Cards still undealt.
        remaining: u32,
    },

    /// The deck was replaced while an operation on it was in flight.
    #[error("deck was replaced while the operation was in flight")]
    DeckConflict,

    /// Id generation retries exhausted without finding a free id.
    #[error("identifier space exhausted after bounded retries")]
    IdSpaceExhausted,

    /// Deck provider could not be reached.
    #[error("deck provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Deck provider did not answer within the configured timeout.
    #[error("deck provider timed out")]
    ProviderTimeout,

    /// Deck provider answered with a non-success HTTP status.
    #[error("deck provider returned status {0}")]
    ProviderStatus(u16),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LobbyError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidPlayerName => 1001,
            Self::InvalidDrawCount => 1002,
            Self::IndexOutOfRange { .. } => 1003,
            Self::RoomNotFound(_) => 2001,
            Self::DeckNotReady(_) => 2002,
            Self::Unauthorized { .. } => 2101,
            Self::Internal(_) => 3000,
            Self::IdSpaceExhausted => 3001,
            Self::InsufficientCards { .. } => 4001,
            Self::RoomFull(_) => 4002,
            Self::DeckConflict => 4003,
            Self::ProviderUnavailable(_) => 5001,
            Self::ProviderTimeout => 5002,
            Self::ProviderStatus(_) => 5003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPlayerName | Self::InvalidDrawCount | Self::IndexOutOfRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::RoomNotFound(_) | Self::DeckNotReady(_) => StatusCode::NOT_FOUND,
            Self::RoomFull(_) | Self::DeckConflict => StatusCode::CONFLICT,
            Self::InsufficientCards { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::IdSpaceExhausted => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProviderUnavailable(_) | Self::ProviderStatus(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LobbyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

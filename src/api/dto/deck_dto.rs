//! Deck-related DTOs: shuffle, draw, pile reorder, and deck views.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Card;

/// A playing card as serialized to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct CardDto {
    /// Compact rank+suit code (e.g. `"AS"`).
    pub code: String,
    /// Rank string.
    pub value: String,
    /// Suit string.
    pub suit: String,
    /// Card face image URL.
    pub image: String,
}

impl From<Card> for CardDto {
    fn from(card: Card) -> Self {
        Self {
            code: card.code,
            value: card.value,
            suit: card.suit,
            image: card.image,
        }
    }
}

/// Compact deck status embedded in room details and shuffle responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeckStatusDto {
    /// Whether the deck is shuffled.
    pub shuffled: bool,
    /// Undealt cards.
    pub remaining: u32,
}

/// Request body for `POST /rooms/{id}/deck/shuffle`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ShuffleRequest {
    /// The requesting player's opaque id (re-validated server-side).
    pub player_id: String,
}

/// Request body for `POST /rooms/{id}/deck/draw`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DrawRequest {
    /// The requesting player's opaque id (re-validated server-side).
    pub player_id: String,
    /// Number of cards to draw (must be at least 1).
    pub count: u32,
}

/// Payload of a successful draw.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrawData {
    /// Cards dealt to the caller, in draw order.
    pub cards: Vec<CardDto>,
    /// Undealt cards after the draw.
    pub remaining: u32,
    /// Size of the caller's pile after the draw.
    pub pile_size: usize,
}

/// Request body for `POST /rooms/{id}/deck/piles/reorder`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRequest {
    /// The pile owner's opaque id (re-validated server-side).
    pub player_id: String,
    /// Current position of the card to move.
    pub from_index: usize,
    /// Target position.
    pub to_index: usize,
}

/// Payload of a successful reorder: the permuted pile.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReorderData {
    /// The caller's pile in its new order.
    pub pile: Vec<CardDto>,
}

/// Query parameters for `GET /rooms/{id}/deck`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeckViewParams {
    /// The requesting player's opaque id (re-validated server-side).
    pub player_id: String,
}

/// Payload of `GET /rooms/{id}/deck`: status plus the caller's own pile.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeckViewData {
    /// Whether the deck is shuffled.
    pub shuffled: bool,
    /// Undealt cards.
    pub remaining: u32,
    /// The caller's pile in current order.
    pub pile: Vec<CardDto>,
}

//! Deck operation handlers: shuffle, draw, pile reorder, deck view.
//!
//! Every operation here mutates or reads room-scoped private state, so
//! every request carries a `player_id` that is re-validated against the
//! room's membership before anything else happens.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CardDto, DataEnvelope, DeckStatusDto, DeckViewData, DeckViewParams, DrawData, DrawRequest,
    ReorderData, ReorderRequest, ShuffleRequest,
};
use crate::app_state::AppState;
use crate::domain::{PlayerId, RoomId};
use crate::error::{ErrorResponse, LobbyError};

/// `POST /rooms/{id}/deck/shuffle` — Shuffle (or create) the room's deck.
///
/// # Errors
///
/// Returns [`LobbyError::RoomNotFound`], [`LobbyError::Unauthorized`], or a
/// provider-class error (prior deck untouched in that case).
#[utoipa::path(
    post,
    path = "/rooms/{id}/deck/shuffle",
    tag = "Deck",
    summary = "Shuffle the deck",
    description = "Requests a fresh shuffled deck from the external provider and replaces the room's deck wholesale, clearing all piles. On provider failure the previous deck is kept.",
    params(
        ("id" = String, Path, description = "Room id"),
    ),
    request_body = ShuffleRequest,
    responses(
        (status = 200, description = "Deck shuffled", body = DeckStatusDto),
        (status = 403, description = "Not a room member", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse),
    )
)]
pub async fn shuffle_deck(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ShuffleRequest>,
) -> Result<impl IntoResponse, LobbyError> {
    let room_id = RoomId::from(id);
    let player_id = PlayerId::from(req.player_id);
    let status = state.room_service.shuffle(&room_id, &player_id).await?;

    Ok(Json(DataEnvelope::new(DeckStatusDto {
        shuffled: status.shuffled,
        remaining: status.remaining,
    })))
}

/// `POST /rooms/{id}/deck/draw` — Draw cards into the caller's pile.
///
/// # Errors
///
/// Returns [`LobbyError::Unauthorized`], [`LobbyError::DeckNotReady`],
/// [`LobbyError::InsufficientCards`], or a provider-class error.
#[utoipa::path(
    post,
    path = "/rooms/{id}/deck/draw",
    tag = "Deck",
    summary = "Draw cards",
    description = "Draws up to `count` cards from the room's deck into the requesting player's pile. Over-draws beyond the locally known remaining count fail fast without contacting the provider.",
    params(
        ("id" = String, Path, description = "Room id"),
    ),
    request_body = DrawRequest,
    responses(
        (status = 200, description = "Cards drawn", body = DrawData),
        (status = 403, description = "Not a room member", body = ErrorResponse),
        (status = 404, description = "Room or deck not found", body = ErrorResponse),
        (status = 422, description = "Not enough cards remaining", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse),
    )
)]
pub async fn draw_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DrawRequest>,
) -> Result<impl IntoResponse, LobbyError> {
    let room_id = RoomId::from(id);
    let player_id = PlayerId::from(req.player_id);
    let drawn = state
        .room_service
        .draw(&room_id, &player_id, req.count)
        .await?;

    Ok(Json(DataEnvelope::new(DrawData {
        cards: drawn.cards.into_iter().map(CardDto::from).collect(),
        remaining: drawn.remaining,
        pile_size: drawn.pile_size,
    })))
}

/// `POST /rooms/{id}/deck/piles/reorder` — Reorder the caller's own pile.
///
/// # Errors
///
/// Returns [`LobbyError::Unauthorized`], [`LobbyError::DeckNotReady`], or
/// [`LobbyError::IndexOutOfRange`].
#[utoipa::path(
    post,
    path = "/rooms/{id}/deck/piles/reorder",
    tag = "Deck",
    summary = "Reorder a pile",
    description = "Moves one card within the requesting player's pile. Purely local: no provider call, ownership unchanged, same multiset of cards.",
    params(
        ("id" = String, Path, description = "Room id"),
    ),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Pile reordered", body = ReorderData),
        (status = 400, description = "Index out of range", body = ErrorResponse),
        (status = 403, description = "Not a room member", body = ErrorResponse),
        (status = 404, description = "Room or deck not found", body = ErrorResponse),
    )
)]
pub async fn reorder_pile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReorderRequest>,
) -> Result<impl IntoResponse, LobbyError> {
    let room_id = RoomId::from(id);
    let player_id = PlayerId::from(req.player_id);
    let pile = state
        .room_service
        .reorder_pile(&room_id, &player_id, req.from_index, req.to_index)
        .await?;

    Ok(Json(DataEnvelope::new(ReorderData {
        pile: pile.into_iter().map(CardDto::from).collect(),
    })))
}

/// `GET /rooms/{id}/deck` — Deck status plus the caller's own pile.
///
/// # Errors
///
/// Returns [`LobbyError::Unauthorized`] or [`LobbyError::DeckNotReady`].
#[utoipa::path(
    get,
    path = "/rooms/{id}/deck",
    tag = "Deck",
    summary = "View the deck",
    description = "Returns the deck status and the requesting player's pile. Players only ever see their own pile.",
    params(
        ("id" = String, Path, description = "Room id"),
        DeckViewParams,
    ),
    responses(
        (status = 200, description = "Deck view", body = DeckViewData),
        (status = 403, description = "Not a room member", body = ErrorResponse),
        (status = 404, description = "Room or deck not found", body = ErrorResponse),
    )
)]
pub async fn get_deck(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeckViewParams>,
) -> Result<impl IntoResponse, LobbyError> {
    let room_id = RoomId::from(id);
    let player_id = PlayerId::from(params.player_id);
    let view = state.room_service.deck_view(&room_id, &player_id).await?;

    Ok(Json(DataEnvelope::new(DeckViewData {
        shuffled: view.shuffled,
        remaining: view.remaining,
        pile: view.pile.into_iter().map(CardDto::from).collect(),
    })))
}

/// Deck operation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms/{id}/deck", get(get_deck))
        .route("/rooms/{id}/deck/shuffle", post(shuffle_deck))
        .route("/rooms/{id}/deck/draw", post(draw_cards))
        .route("/rooms/{id}/deck/piles/reorder", post(reorder_pile))
}

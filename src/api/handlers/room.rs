//! Room lifecycle handlers: create, list, get, join, delete.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateRoomData, CreateRoomRequest, DataEnvelope, DeckStatusDto, JoinRoomData, JoinRoomRequest,
    RoomDetailData, RoomSummaryDto,
};
use crate::app_state::AppState;
use crate::domain::RoomId;
use crate::error::{ErrorResponse, LobbyError};

/// `POST /rooms` — Create a room; the host joins it immediately.
///
/// # Errors
///
/// Returns [`LobbyError::InvalidPlayerName`] on a blank host name.
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "Rooms",
    summary = "Create a room",
    description = "Creates a room with a generated id and mints the host's player session. The returned host_id is the host's proof of membership for all later deck operations.",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = CreateRoomData),
        (status = 400, description = "Blank host name", body = ErrorResponse),
        (status = 503, description = "Id space exhausted", body = ErrorResponse),
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, LobbyError> {
    let created = state
        .room_service
        .create_room(&req.room_name, &req.host_name)
        .await?;

    let response = DataEnvelope::new(CreateRoomData {
        room_id: created.room_id.to_string(),
        room_name: created.room_name,
        host_id: created.host.player_id.to_string(),
        host_name: created.host.player_name,
    });
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /rooms` — List all rooms as a map keyed by room id.
///
/// # Errors
///
/// Infallible in practice; typed for handler uniformity.
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "Rooms",
    summary = "List rooms",
    description = "Returns summaries of all live rooms keyed by room id. Read-only and cheap: served from the lobby synchronizer's cached snapshot.",
    responses(
        (status = 200, description = "Room listing", body = serde_json::Value),
    )
)]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, LobbyError> {
    let summaries = state.lobby.refresh().await;
    let data: HashMap<String, RoomSummaryDto> = summaries
        .into_iter()
        .map(|s| (s.id.to_string(), RoomSummaryDto::from(s)))
        .collect();
    Ok(Json(DataEnvelope::new(data)))
}

/// `GET /rooms/{id}` — Room detail.
///
/// # Errors
///
/// Returns [`LobbyError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "Rooms",
    summary = "Get room detail",
    description = "Returns room membership (display names only) and deck status.",
    params(
        ("id" = String, Path, description = "Room id"),
    ),
    responses(
        (status = 200, description = "Room detail", body = RoomDetailData),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, LobbyError> {
    let room_id = RoomId::from(id);
    let entry = state.room_service.registry().get(&room_id).await?;
    let room = entry.read().await;

    let response = DataEnvelope::new(RoomDetailData {
        id: room.id.to_string(),
        name: room.name.clone(),
        host: room.host_name().to_string(),
        players: room
            .players
            .iter()
            .map(|p| p.player_name.clone())
            .collect(),
        num_players: room.num_players(),
        created_at: room.created_at,
        deck: room.deck.as_ref().map(|d| DeckStatusDto {
            shuffled: d.shuffled,
            remaining: d.remaining,
        }),
    });
    Ok(Json(response))
}

/// `POST /rooms/{id}/join` — Join a room as a new player.
///
/// # Errors
///
/// Returns [`LobbyError::RoomNotFound`], [`LobbyError::RoomFull`], or
/// [`LobbyError::InvalidPlayerName`].
#[utoipa::path(
    post,
    path = "/rooms/{id}/join",
    tag = "Rooms",
    summary = "Join a room",
    description = "Mints a fresh player session in the room. Duplicate display names are allowed; the returned player_id is the caller's proof of membership.",
    params(
        ("id" = String, Path, description = "Room id"),
    ),
    request_body = JoinRoomRequest,
    responses(
        (status = 200, description = "Joined", body = JoinRoomData),
        (status = 400, description = "Blank player name", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "Room full", body = ErrorResponse),
    )
)]
pub async fn join_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<JoinRoomRequest>,
) -> Result<impl IntoResponse, LobbyError> {
    let room_id = RoomId::from(id);
    let joined = state
        .room_service
        .join_room(&room_id, &req.player_name)
        .await?;

    let response = DataEnvelope::new(JoinRoomData {
        room_id: room_id.to_string(),
        room_name: joined.room_name,
        player_id: joined.session.player_id.to_string(),
        player_name: joined.session.player_name,
    });
    Ok(Json(response))
}

/// `DELETE /rooms/{id}` — Close a room.
///
/// # Errors
///
/// Returns [`LobbyError::RoomNotFound`] if the room does not exist.
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "Rooms",
    summary = "Close a room",
    description = "Removes the room and emits a room_closed event.",
    params(
        ("id" = String, Path, description = "Room id"),
    ),
    responses(
        (status = 204, description = "Room closed"),
        (status = 404, description = "Room not found", body = ErrorResponse),
    )
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, LobbyError> {
    let room_id = RoomId::from(id);
    state.room_service.close_room(&room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Room lifecycle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(create_room).get(list_rooms))
        .route("/rooms/{id}", get(get_room).delete(delete_room))
        .route("/rooms/{id}/join", post(join_room))
}

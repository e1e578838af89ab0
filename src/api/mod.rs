//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Endpoints are mounted at the root, matching the wire contract the lobby
//! clients already speak (`/rooms`, `/rooms/{id}/join`, ...).

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
}

/// OpenAPI document for the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::room::create_room,
        handlers::room::list_rooms,
        handlers::room::get_room,
        handlers::room::join_room,
        handlers::room::delete_room,
        handlers::deck::shuffle_deck,
        handlers::deck::draw_cards,
        handlers::deck::reorder_pile,
        handlers::deck::get_deck,
        handlers::system::greeting_handler,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::CreateRoomRequest,
        dto::CreateRoomData,
        dto::JoinRoomRequest,
        dto::JoinRoomData,
        dto::RoomSummaryDto,
        dto::RoomDetailData,
        dto::CardDto,
        dto::DeckStatusDto,
        dto::ShuffleRequest,
        dto::DrawRequest,
        dto::DrawData,
        dto::ReorderRequest,
        dto::ReorderData,
        dto::DeckViewData,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "Rooms", description = "Room lifecycle and membership"),
        (name = "Deck", description = "Deck and pile operations"),
        (name = "System", description = "Health and greeting"),
    )
)]
pub struct ApiDoc;

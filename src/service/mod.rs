//! Service layer: business logic orchestration.
//!
//! [`RoomService`] coordinates room and deck operations, delegates card
//! mechanics to the injected deck provider, and emits events through the
//! [`crate::domain::EventBus`]. [`LobbySynchronizer`] maintains the cached
//! listing view.

pub mod lobby;
pub mod room_service;

pub use lobby::LobbySynchronizer;
pub use room_service::RoomService;

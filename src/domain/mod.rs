//! Domain layer: core types, room registry, and event system.
//!
//! This module contains the server-side domain model including room and
//! player identity, the room aggregate with its deck state machine, the
//! event bus for broadcasting state changes, and the room registry for
//! concurrent room storage.

pub mod deck;
pub mod event_bus;
pub mod ids;
pub mod room;
pub mod room_event;
pub mod room_registry;

pub use deck::{Card, DeckState};
pub use event_bus::EventBus;
pub use ids::{PlayerId, RoomId};
pub use room::{PlayerSession, Room, RoomSummary};
pub use room_event::{CloseReason, RoomEvent};
pub use room_registry::RoomRegistry;

//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::{LobbySynchronizer, RoomService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Explicitly owned and constructed at service start; nothing here is
/// ambient module-level state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Room service for all business logic.
    pub room_service: Arc<RoomService>,
    /// Cached lobby listing.
    pub lobby: Arc<LobbySynchronizer>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

//! # cardroom-gateway
//!
//! REST API and WebSocket gateway coordinating multiplayer card-room
//! lobbies.
//!
//! This crate provides the room/session coordination core as a standalone
//! service: a registry of live game rooms, opaque per-room player identity,
//! and a deck/pile state machine. All card mechanics (shuffle order, card
//! faces) are delegated to an external deck-of-cards API — this service is
//! a coordination layer.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── RoomService (service/)
//!     ├── LobbySynchronizer (service/)
//!     ├── SessionIssuer (session)
//!     ├── EventBus (domain/)
//!     │
//!     ├── RoomRegistry (domain/)
//!     │
//!     └── DeckProvider (provider/) ──→ external deck API
//! ```
//!
//! State is volatile by design: the registry lives in memory and is lost on
//! process restart. There is no persistence layer.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod service;
pub mod session;
pub mod ws;

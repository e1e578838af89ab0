//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams room events to clients that
//! subscribe by room id. The stream is read-only by design: every mutation
//! must pass session validation at the REST boundary, so no commands beyond
//! subscription management are accepted here.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;

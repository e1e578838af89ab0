//! Data Transfer Objects for REST request/response serialization.
//!
//! Ids cross the wire as opaque strings; conversion to typed domain ids
//! happens in the handlers.

pub mod common_dto;
pub mod deck_dto;
pub mod room_dto;

pub use common_dto::*;
pub use deck_dto::*;
pub use room_dto::*;

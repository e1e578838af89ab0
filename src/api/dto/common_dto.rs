//! Shared DTO types used across multiple endpoints.

use serde::Serialize;

/// Success envelope wrapping every data-bearing response.
///
/// All success responses follow the shape `{ "data": ... }`; errors use
/// [`crate::error::ErrorResponse`] instead.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    /// Variant-specific payload.
    pub data: T,
}

impl<T> DataEnvelope<T> {
    /// Wraps a payload in the envelope.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

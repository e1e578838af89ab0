//! Deck provider: the external card-mechanics capability.
//!
//! All shuffle and draw mechanics are delegated to an external deck API;
//! this service never owns card order. [`DeckProvider`] is the injected
//! seam: the production implementation speaks HTTP, and tests inject an
//! in-memory stub so the whole coordination core runs without network
//! access.

pub mod http;
#[cfg(test)]
pub mod stub;

use async_trait::async_trait;

use crate::domain::Card;
use crate::error::LobbyError;

pub use http::CardsApiProvider;

/// Deck state reported by the provider after a create or reshuffle call.
#[derive(Debug, Clone)]
pub struct ProviderDeck {
    /// Provider-issued deck identifier.
    pub deck_id: String,
    /// Whether the provider reports the deck as shuffled.
    pub shuffled: bool,
    /// Undealt cards in the deck.
    pub remaining: u32,
}

/// Result of a draw call.
///
/// `cards` may legitimately be shorter than the requested count when the
/// provider had fewer cards left; `remaining` is the provider's
/// authoritative post-draw count and always wins over local estimates.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    /// Cards actually dealt, in draw order.
    pub cards: Vec<Card>,
    /// Undealt cards after this draw, per the provider.
    pub remaining: u32,
}

/// Abstraction over the external shuffle/draw service.
///
/// Implementations must be safe to call concurrently; the room service
/// never holds a room lock across these calls.
#[async_trait]
pub trait DeckProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Creates a new shuffled deck.
    ///
    /// # Errors
    ///
    /// Returns a provider-class [`LobbyError`] on network failure, timeout,
    /// or an unsuccessful upstream response.
    async fn create_shuffled(&self) -> Result<ProviderDeck, LobbyError>;

    /// Re-shuffles an existing deck, returning it to its full size.
    ///
    /// # Errors
    ///
    /// Returns a provider-class [`LobbyError`] on network failure, timeout,
    /// or an unsuccessful upstream response.
    async fn reshuffle(&self, deck_id: &str) -> Result<ProviderDeck, LobbyError>;

    /// Draws up to `count` cards from the deck.
    ///
    /// # Errors
    ///
    /// Returns a provider-class [`LobbyError`] on network failure, timeout,
    /// or an unsuccessful upstream response.
    async fn draw(&self, deck_id: &str, count: u32) -> Result<DrawOutcome, LobbyError>;
}

//! In-memory [`DeckProvider`] double for network-free tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{DeckProvider, DrawOutcome, ProviderDeck};
use crate::domain::Card;
use crate::error::LobbyError;

const VALUES: [&str; 13] = [
    "ACE", "2", "3", "4", "5", "6", "7", "8", "9", "10", "JACK", "QUEEN", "KING",
];
const SUITS: [&str; 4] = ["SPADES", "HEARTS", "CLUBS", "DIAMONDS"];

/// Deterministic provider emulating a standard 52-card deck service.
///
/// Decks are tracked by remaining count only; drawn cards are synthesized
/// in a fixed order, which is all the coordination core observes.
#[derive(Debug)]
pub struct StubDeckProvider {
    deck_size: u32,
    remaining: Mutex<HashMap<String, u32>>,
    next_deck: AtomicU32,
    fail: AtomicBool,
}

impl StubDeckProvider {
    /// Creates a stub dealing standard 52-card decks.
    pub fn new() -> Self {
        Self::with_deck_size(52)
    }

    /// Creates a stub whose decks hold `deck_size` cards.
    pub fn with_deck_size(deck_size: u32) -> Self {
        Self {
            deck_size,
            remaining: Mutex::new(HashMap::new()),
            next_deck: AtomicU32::new(1),
            fail: AtomicBool::new(false),
        }
    }

    /// When set, every provider call fails with `ProviderUnavailable`.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Overrides the remaining count of an existing deck.
    pub async fn force_remaining(&self, deck_id: &str, remaining: u32) {
        self.remaining
            .lock()
            .await
            .insert(deck_id.to_string(), remaining);
    }

    fn check_fail(&self) -> Result<(), LobbyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LobbyError::ProviderUnavailable(
                "stub provider forced failure".to_string(),
            ));
        }
        Ok(())
    }

    fn fake_card(index: u32) -> Card {
        let value = VALUES[(index as usize) % VALUES.len()];
        let suit = SUITS[(index as usize / VALUES.len()) % SUITS.len()];
        let code = format!("{}{}", &value[..1], &suit[..1]);
        Card {
            code,
            value: value.to_string(),
            suit: suit.to_string(),
            image: format!("https://stub.test/{value}-{suit}.png"),
        }
    }
}

impl Default for StubDeckProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeckProvider for StubDeckProvider {
    async fn create_shuffled(&self) -> Result<ProviderDeck, LobbyError> {
        self.check_fail()?;
        let n = self.next_deck.fetch_add(1, Ordering::SeqCst);
        let deck_id = format!("stub-deck-{n}");
        self.remaining
            .lock()
            .await
            .insert(deck_id.clone(), self.deck_size);
        Ok(ProviderDeck {
            deck_id,
            shuffled: true,
            remaining: self.deck_size,
        })
    }

    async fn reshuffle(&self, deck_id: &str) -> Result<ProviderDeck, LobbyError> {
        self.check_fail()?;
        self.remaining
            .lock()
            .await
            .insert(deck_id.to_string(), self.deck_size);
        Ok(ProviderDeck {
            deck_id: deck_id.to_string(),
            shuffled: true,
            remaining: self.deck_size,
        })
    }

    async fn draw(&self, deck_id: &str, count: u32) -> Result<DrawOutcome, LobbyError> {
        self.check_fail()?;
        let mut decks = self.remaining.lock().await;
        let remaining = decks.get_mut(deck_id).ok_or_else(|| {
            LobbyError::ProviderUnavailable(format!("unknown deck {deck_id}"))
        })?;
        // Like the real API: a draw beyond the deck deals what is left.
        let granted = count.min(*remaining);
        let already_dealt = self.deck_size - *remaining;
        *remaining -= granted;
        let cards = (0..granted)
            .map(|i| Self::fake_card(already_dealt + i))
            .collect();
        Ok(DrawOutcome {
            cards,
            remaining: *remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn draws_decrement_until_empty() {
        let stub = StubDeckProvider::with_deck_size(3);
        let deck = stub.create_shuffled().await.unwrap();
        assert_eq!(deck.remaining, 3);

        let first = stub.draw(&deck.deck_id, 2).await.unwrap();
        assert_eq!(first.cards.len(), 2);
        assert_eq!(first.remaining, 1);

        // Over-draw deals only what is left.
        let second = stub.draw(&deck.deck_id, 5).await.unwrap();
        assert_eq!(second.cards.len(), 1);
        assert_eq!(second.remaining, 0);
    }

    #[tokio::test]
    async fn reshuffle_restores_full_deck() {
        let stub = StubDeckProvider::new();
        let deck = stub.create_shuffled().await.unwrap();
        let _ = stub.draw(&deck.deck_id, 10).await.unwrap();

        let fresh = stub.reshuffle(&deck.deck_id).await.unwrap();
        assert_eq!(fresh.remaining, 52);
        assert_eq!(fresh.deck_id, deck.deck_id);
    }

    #[tokio::test]
    async fn forced_failure_surfaces_as_provider_error() {
        let stub = StubDeckProvider::new();
        stub.set_fail(true);
        assert!(matches!(
            stub.create_shuffled().await,
            Err(LobbyError::ProviderUnavailable(_))
        ));
    }
}

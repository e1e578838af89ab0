//! Deck state machine: one external-provider deck plus per-player piles.
//!
//! A [`DeckState`] mirrors the authoritative deck held by the external
//! provider. The provider owns the card order and the true remaining count;
//! this side tracks which cards have already been dealt into which player's
//! pile and keeps `remaining` reconciled to the provider's responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::PlayerId;
use crate::error::LobbyError;

/// A single playing card as reported by the deck provider.
///
/// Immutable once drawn. Ownership changes only by explicit pile
/// reassignment; reordering within a pile is a same-owner permutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Compact rank+suit code (e.g. `"AS"`, `"0H"` for ten of hearts).
    pub code: String,
    /// Rank string (e.g. `"ACE"`, `"2"`, `"KING"`).
    pub value: String,
    /// Suit string (e.g. `"SPADES"`).
    pub suit: String,
    /// URL of the card face image served by the provider.
    pub image: String,
}

/// Shuffle/draw status of the external deck associated with one room.
#[derive(Debug, Clone)]
pub struct DeckState {
    /// Provider-issued deck identifier; key for all upstream calls.
    pub deck_id: String,
    /// Whether the provider reports the deck as shuffled.
    pub shuffled: bool,
    /// Authoritative count of undealt cards. Decremented only by successful
    /// draws and reconciled to the provider's response, never locally
    /// estimated.
    pub remaining: u32,
    /// Cards dealt so far, keyed by pile owner. Insertion order within a
    /// pile is draw order until the owner reorders it.
    pub piles: HashMap<PlayerId, Vec<Card>>,
}

impl DeckState {
    /// Creates a fresh deck state with no piles.
    #[must_use]
    pub fn new(deck_id: String, shuffled: bool, remaining: u32) -> Self {
        Self {
            deck_id,
            shuffled,
            remaining,
            piles: HashMap::new(),
        }
    }

    /// Returns the owner's pile, or an empty slice if they have not drawn.
    #[must_use]
    pub fn pile(&self, owner: &PlayerId) -> &[Card] {
        self.piles.get(owner).map_or(&[], Vec::as_slice)
    }

    /// Returns the number of cards in the owner's pile.
    #[must_use]
    pub fn pile_len(&self, owner: &PlayerId) -> usize {
        self.piles.get(owner).map_or(0, Vec::len)
    }

    /// Total number of cards dealt into piles.
    #[must_use]
    pub fn dealt(&self) -> usize {
        self.piles.values().map(Vec::len).sum()
    }

    /// Appends drawn cards to the owner's pile (created on first draw) and
    /// reconciles `remaining` to the count reported by the provider.
    pub fn apply_draw(&mut self, owner: &PlayerId, cards: Vec<Card>, provider_remaining: u32) {
        self.piles.entry(owner.clone()).or_default().extend(cards);
        self.remaining = provider_remaining;
    }

    /// Moves the card at `from` to position `to` within the owner's pile.
    ///
    /// Pure local permutation: the multiset of cards is unchanged and no
    /// upstream call is made. Returns the permuted pile.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::IndexOutOfRange`] if either index is outside
    /// `[0, pile_len)`. An owner with no pile has length zero, so any index
    /// is out of range.
    pub fn reorder(
        &mut self,
        owner: &PlayerId,
        from: usize,
        to: usize,
    ) -> Result<&[Card], LobbyError> {
        let len = self.pile_len(owner);
        if from >= len || to >= len {
            let index = if from >= len { from } else { to };
            return Err(LobbyError::IndexOutOfRange { index, len });
        }
        // Indices validated above; the entry exists because len > 0.
        let pile = self.piles.entry(owner.clone()).or_default();
        let card = pile.remove(from);
        pile.insert(to, card);
        Ok(pile.as_slice())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        Card {
            code: code.to_string(),
            value: code.to_string(),
            suit: "SPADES".to_string(),
            image: format!("https://cards.example/{code}.png"),
        }
    }

    fn alice() -> PlayerId {
        PlayerId::from("alice1")
    }

    #[test]
    fn apply_draw_creates_pile_and_reconciles_remaining() {
        let mut deck = DeckState::new("d1".to_string(), true, 52);
        deck.apply_draw(&alice(), vec![card("AS"), card("KS")], 50);

        assert_eq!(deck.pile_len(&alice()), 2);
        assert_eq!(deck.remaining, 50);
        assert_eq!(deck.dealt(), 2);
    }

    #[test]
    fn apply_draw_appends_to_existing_pile() {
        let mut deck = DeckState::new("d1".to_string(), true, 52);
        deck.apply_draw(&alice(), vec![card("AS")], 51);
        deck.apply_draw(&alice(), vec![card("KS")], 50);

        let pile = deck.pile(&alice());
        assert_eq!(pile.len(), 2);
        assert_eq!(pile[0].code, "AS");
        assert_eq!(pile[1].code, "KS");
    }

    #[test]
    fn short_draw_reconciles_to_provider_count() {
        let mut deck = DeckState::new("d1".to_string(), true, 3);
        // Provider only had two cards left despite a larger request.
        deck.apply_draw(&alice(), vec![card("AS"), card("KS")], 0);
        assert_eq!(deck.remaining, 0);
        assert_eq!(deck.pile_len(&alice()), 2);
    }

    #[test]
    fn reorder_is_a_permutation() {
        let mut deck = DeckState::new("d1".to_string(), true, 49);
        deck.apply_draw(&alice(), vec![card("AS"), card("KS"), card("QS")], 49);

        let result = deck.reorder(&alice(), 0, 2);
        let Ok(pile) = result else {
            panic!("reorder failed");
        };
        let codes: Vec<&str> = pile.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["KS", "QS", "AS"]);

        // Same multiset, only order changed.
        let mut sorted: Vec<&str> = codes.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec!["AS", "KS", "QS"]);
    }

    #[test]
    fn reorder_rejects_out_of_range_indices() {
        let mut deck = DeckState::new("d1".to_string(), true, 50);
        deck.apply_draw(&alice(), vec![card("AS"), card("KS")], 50);

        assert!(matches!(
            deck.reorder(&alice(), 2, 0),
            Err(LobbyError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            deck.reorder(&alice(), 0, 5),
            Err(LobbyError::IndexOutOfRange { index: 5, len: 2 })
        ));
        // Pile untouched by failed reorders.
        assert_eq!(deck.pile(&alice())[0].code, "AS");
    }

    #[test]
    fn reorder_on_absent_pile_is_out_of_range() {
        let mut deck = DeckState::new("d1".to_string(), true, 52);
        assert!(matches!(
            deck.reorder(&alice(), 0, 0),
            Err(LobbyError::IndexOutOfRange { len: 0, .. })
        ));
    }
}

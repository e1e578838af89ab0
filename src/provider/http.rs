//! HTTP implementation of [`DeckProvider`] for deckofcardsapi.com-style
//! services.
//!
//! The wire contract: `GET {base}/new/shuffle/?deck_count=1` creates a
//! shuffled deck, `GET {base}/{deck_id}/shuffle/` re-shuffles it, and
//! `GET {base}/{deck_id}/draw/?count=N` deals cards. Every response carries
//! a `success` flag plus the deck id and remaining count.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{DeckProvider, DrawOutcome, ProviderDeck};
use crate::domain::Card;
use crate::error::LobbyError;

/// Deck API client with an explicit per-request timeout.
#[derive(Debug, Clone)]
pub struct CardsApiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl CardsApiProvider {
    /// Creates a client against the given base URL (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::Internal`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, LobbyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LobbyError::Internal(format!("http client construction failed: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn new_deck_url(&self) -> String {
        format!("{}/new/shuffle/?deck_count=1", self.base_url)
    }

    fn reshuffle_url(&self, deck_id: &str) -> String {
        format!("{}/{deck_id}/shuffle/", self.base_url)
    }

    fn draw_url(&self, deck_id: &str, count: u32) -> String {
        format!("{}/{deck_id}/draw/?count={count}", self.base_url)
    }

    async fn get_deck(&self, url: String) -> Result<ProviderDeck, LobbyError> {
        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LobbyError::ProviderStatus(status.as_u16()));
        }
        let body: DeckResponse = response.json().await.map_err(map_body_error)?;
        if !body.success {
            return Err(LobbyError::ProviderUnavailable(
                "deck API reported an unsuccessful operation".to_string(),
            ));
        }
        Ok(ProviderDeck {
            deck_id: body.deck_id,
            shuffled: body.shuffled,
            remaining: body.remaining,
        })
    }
}

#[async_trait]
impl DeckProvider for CardsApiProvider {
    async fn create_shuffled(&self) -> Result<ProviderDeck, LobbyError> {
        self.get_deck(self.new_deck_url()).await
    }

    async fn reshuffle(&self, deck_id: &str) -> Result<ProviderDeck, LobbyError> {
        self.get_deck(self.reshuffle_url(deck_id)).await
    }

    async fn draw(&self, deck_id: &str, count: u32) -> Result<DrawOutcome, LobbyError> {
        let url = self.draw_url(deck_id, count);
        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LobbyError::ProviderStatus(status.as_u16()));
        }
        let body: DrawResponse = response.json().await.map_err(map_body_error)?;
        if !body.success {
            return Err(LobbyError::ProviderUnavailable(
                "deck API reported an unsuccessful draw".to_string(),
            ));
        }
        Ok(DrawOutcome {
            cards: body.cards.into_iter().map(Card::from).collect(),
            remaining: body.remaining,
        })
    }
}

/// Maps a transport-level failure to the provider error taxonomy.
fn map_send_error(err: reqwest::Error) -> LobbyError {
    if err.is_timeout() {
        LobbyError::ProviderTimeout
    } else {
        LobbyError::ProviderUnavailable(err.to_string())
    }
}

/// Maps a body read/decode failure. A malformed body is an upstream fault,
/// not a local one.
fn map_body_error(err: reqwest::Error) -> LobbyError {
    if err.is_timeout() {
        LobbyError::ProviderTimeout
    } else {
        LobbyError::ProviderUnavailable(format!("invalid response body: {err}"))
    }
}

/// Deck-level response body (create and reshuffle calls).
#[derive(Debug, Deserialize)]
struct DeckResponse {
    success: bool,
    deck_id: String,
    #[serde(default)]
    shuffled: bool,
    remaining: u32,
}

/// Draw response body.
#[derive(Debug, Deserialize)]
struct DrawResponse {
    success: bool,
    remaining: u32,
    #[serde(default)]
    cards: Vec<WireCard>,
}

/// A card as serialized by the deck API.
#[derive(Debug, Deserialize)]
struct WireCard {
    code: String,
    value: String,
    suit: String,
    #[serde(default)]
    image: String,
}

impl From<WireCard> for Card {
    fn from(wire: WireCard) -> Self {
        Self {
            code: wire.code,
            value: wire.value,
            suit: wire.suit,
            image: wire.image,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn provider() -> CardsApiProvider {
        CardsApiProvider::new(
            "https://deckofcardsapi.com/api/deck/".to_string(),
            Duration::from_millis(5_000),
        )
        .unwrap()
    }

    #[test]
    fn urls_match_the_deck_api_contract() {
        let p = provider();
        assert_eq!(
            p.new_deck_url(),
            "https://deckofcardsapi.com/api/deck/new/shuffle/?deck_count=1"
        );
        assert_eq!(
            p.reshuffle_url("3p40paa87x90"),
            "https://deckofcardsapi.com/api/deck/3p40paa87x90/shuffle/"
        );
        assert_eq!(
            p.draw_url("3p40paa87x90", 2),
            "https://deckofcardsapi.com/api/deck/3p40paa87x90/draw/?count=2"
        );
    }

    #[test]
    fn deck_response_parses() {
        let json = r#"{
            "success": true,
            "deck_id": "3p40paa87x90",
            "shuffled": true,
            "remaining": 52
        }"#;
        let body: DeckResponse = serde_json::from_str(json).unwrap();
        assert!(body.success);
        assert_eq!(body.deck_id, "3p40paa87x90");
        assert!(body.shuffled);
        assert_eq!(body.remaining, 52);
    }

    #[test]
    fn draw_response_parses_cards() {
        let json = r#"{
            "success": true,
            "deck_id": "3p40paa87x90",
            "cards": [
                {
                    "code": "6H",
                    "image": "https://deckofcardsapi.com/static/img/6H.png",
                    "value": "6",
                    "suit": "HEARTS"
                },
                {
                    "code": "KS",
                    "image": "https://deckofcardsapi.com/static/img/KS.png",
                    "value": "KING",
                    "suit": "SPADES"
                }
            ],
            "remaining": 50
        }"#;
        let body: DrawResponse = serde_json::from_str(json).unwrap();
        assert!(body.success);
        assert_eq!(body.remaining, 50);
        assert_eq!(body.cards.len(), 2);

        let cards: Vec<Card> = body.cards.into_iter().map(Card::from).collect();
        assert_eq!(cards[0].code, "6H");
        assert_eq!(cards[1].suit, "SPADES");
    }

    #[test]
    fn unsuccessful_body_is_detected() {
        let json = r#"{"success": false, "deck_id": "x", "remaining": 0}"#;
        let body: DeckResponse = serde_json::from_str(json).unwrap();
        assert!(!body.success);
    }
}

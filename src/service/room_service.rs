//! Room service: orchestrates room and deck operations and emits events.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::{
    Card, CloseReason, DeckState, EventBus, PlayerId, PlayerSession, Room, RoomEvent, RoomId,
    RoomRegistry,
};
use crate::error::LobbyError;
use crate::provider::DeckProvider;
use crate::session::SessionIssuer;

/// Result of a successful room creation.
#[derive(Debug)]
pub struct CreatedRoom {
    /// Generated room id.
    pub room_id: RoomId,
    /// Room name as stored.
    pub room_name: String,
    /// The host's freshly minted session.
    pub host: PlayerSession,
}

/// Result of a successful join.
#[derive(Debug)]
pub struct JoinedRoom {
    /// The joining player's freshly minted session.
    pub session: PlayerSession,
    /// Room name, echoed for the client.
    pub room_name: String,
    /// Member count after the join.
    pub num_players: usize,
}

/// Deck status after a shuffle.
#[derive(Debug)]
pub struct DeckStatus {
    /// Whether the provider reports the deck as shuffled.
    pub shuffled: bool,
    /// Undealt cards in the fresh deck.
    pub remaining: u32,
}

/// Result of a successful draw.
#[derive(Debug)]
pub struct DrawnCards {
    /// Cards dealt to the caller, in draw order.
    pub cards: Vec<Card>,
    /// Undealt cards after the draw (provider-authoritative).
    pub remaining: u32,
    /// Size of the caller's pile after the draw.
    pub pile_size: usize,
}

/// Membership-scoped snapshot of a room's deck.
#[derive(Debug)]
pub struct DeckView {
    /// Whether the deck is shuffled.
    pub shuffled: bool,
    /// Undealt cards.
    pub remaining: u32,
    /// The caller's own pile.
    pub pile: Vec<Card>,
}

/// Orchestration layer for all room and deck operations.
///
/// Owns references to [`RoomRegistry`] for state, [`SessionIssuer`] for
/// identity, the injected [`DeckProvider`] for card mechanics, and
/// [`EventBus`] for event emission. Every mutation follows the pattern:
/// acquire lock → validate → apply → stamp activity → publish event.
/// Provider round trips never run while a room lock is held.
#[derive(Debug, Clone)]
pub struct RoomService {
    registry: Arc<RoomRegistry>,
    sessions: SessionIssuer,
    provider: Arc<dyn DeckProvider>,
    event_bus: EventBus,
    max_players: usize,
}

impl RoomService {
    /// Creates a new `RoomService`.
    ///
    /// `max_players` caps room membership; `0` disables the cap.
    #[must_use]
    pub fn new(
        registry: Arc<RoomRegistry>,
        sessions: SessionIssuer,
        provider: Arc<dyn DeckProvider>,
        event_bus: EventBus,
        max_players: usize,
    ) -> Self {
        Self {
            registry,
            sessions,
            provider,
            event_bus,
            max_players,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`RoomRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Creates a room and its host session.
    ///
    /// Id generation and insertion are atomic with respect to concurrent
    /// creations; see [`RoomRegistry::create_with`].
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::InvalidPlayerName`] on a blank host name or
    /// [`LobbyError::IdSpaceExhausted`] if id generation retries run out.
    pub async fn create_room(
        &self,
        room_name: &str,
        host_name: &str,
    ) -> Result<CreatedRoom, LobbyError> {
        let entry = self
            .registry
            .create_with(|room_id| {
                let host = self.sessions.issue(&room_id, &[], host_name)?;
                Ok(Room::new(room_id, room_name.trim().to_string(), host))
            })
            .await?;

        let (room_id, room_name, host) = {
            let room = entry.read().await;
            let host = room
                .players
                .first()
                .cloned()
                .ok_or_else(|| LobbyError::Internal("created room has no host".to_string()))?;
            (room.id.clone(), room.name.clone(), host)
        };

        let _ = self.event_bus.publish(RoomEvent::RoomCreated {
            room_id: room_id.clone(),
            room_name: room_name.clone(),
            host_name: host.player_name.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%room_id, %room_name, "room created");
        Ok(CreatedRoom {
            room_id,
            room_name,
            host,
        })
    }

    /// Adds a player to an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RoomNotFound`], [`LobbyError::RoomFull`], or
    /// [`LobbyError::InvalidPlayerName`]. No partial mutation on failure.
    pub async fn join_room(
        &self,
        room_id: &RoomId,
        player_name: &str,
    ) -> Result<JoinedRoom, LobbyError> {
        let entry = self.registry.get(room_id).await?;

        let (session, room_name, num_players) = {
            let mut room = entry.write().await;
            if self.max_players > 0 && room.num_players() >= self.max_players {
                return Err(LobbyError::RoomFull(room_id.clone()));
            }
            let session = self.sessions.issue(&room.id, &room.players, player_name)?;
            room.add_player(session.clone());
            (session, room.name.clone(), room.num_players())
        };

        let _ = self.event_bus.publish(RoomEvent::PlayerJoined {
            room_id: room_id.clone(),
            player_name: session.player_name.clone(),
            num_players,
            timestamp: Utc::now(),
        });

        tracing::info!(%room_id, player_name = %session.player_name, num_players, "player joined");
        Ok(JoinedRoom {
            session,
            room_name,
            num_players,
        })
    }

    /// Removes a room from the registry.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RoomNotFound`] if the room does not exist.
    pub async fn close_room(&self, room_id: &RoomId) -> Result<(), LobbyError> {
        let _ = self.registry.remove(room_id).await?;
        let _ = self.event_bus.publish(RoomEvent::RoomClosed {
            room_id: room_id.clone(),
            reason: CloseReason::Deleted,
            timestamp: Utc::now(),
        });
        tracing::info!(%room_id, "room closed");
        Ok(())
    }

    /// Shuffles the room's deck, creating one on first use.
    ///
    /// The previous deck (and every pile) is discarded only after the
    /// provider call succeeds; on provider failure the room keeps its prior
    /// deck and remains fully usable.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RoomNotFound`], [`LobbyError::Unauthorized`],
    /// or a provider-class error.
    pub async fn shuffle(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<DeckStatus, LobbyError> {
        let entry = self.registry.get(room_id).await?;

        let prior_deck_id = {
            let room = entry.read().await;
            if !self.sessions.validate(&room, player_id) {
                return Err(LobbyError::Unauthorized {
                    room_id: room_id.clone(),
                });
            }
            room.deck.as_ref().map(|d| d.deck_id.clone())
        };

        // Provider round trip with no room lock held.
        let fresh = match prior_deck_id {
            Some(deck_id) => self.provider.reshuffle(&deck_id).await?,
            None => self.provider.create_shuffled().await?,
        };

        let shuffled = fresh.shuffled;
        let remaining = fresh.remaining;
        {
            let mut room = entry.write().await;
            room.deck = Some(DeckState::new(fresh.deck_id, shuffled, remaining));
            room.touch();
        }

        let _ = self.event_bus.publish(RoomEvent::DeckShuffled {
            room_id: room_id.clone(),
            remaining,
            timestamp: Utc::now(),
        });

        tracing::info!(%room_id, remaining, "deck shuffled");
        Ok(DeckStatus { shuffled, remaining })
    }

    /// Draws `count` cards into the requesting player's pile.
    ///
    /// Preconditions are checked against local state before the upstream
    /// call (fail fast, no network on over-draw). The provider's response
    /// is authoritative: it may deal fewer cards than requested, and its
    /// reported remaining count replaces the local one.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::Unauthorized`], [`LobbyError::DeckNotReady`],
    /// [`LobbyError::InvalidDrawCount`], [`LobbyError::InsufficientCards`],
    /// [`LobbyError::DeckConflict`] if the deck was replaced mid-flight, or
    /// a provider-class error. Local state is unchanged on every failure.
    pub async fn draw(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        count: u32,
    ) -> Result<DrawnCards, LobbyError> {
        if count == 0 {
            return Err(LobbyError::InvalidDrawCount);
        }
        let entry = self.registry.get(room_id).await?;

        let (deck_id, player_name) = {
            let room = entry.read().await;
            if !self.sessions.validate(&room, player_id) {
                return Err(LobbyError::Unauthorized {
                    room_id: room_id.clone(),
                });
            }
            let player_name = room
                .member(player_id)
                .map_or_else(String::new, |p| p.player_name.clone());
            let deck = room
                .deck
                .as_ref()
                .ok_or_else(|| LobbyError::DeckNotReady(room_id.clone()))?;
            if count > deck.remaining {
                return Err(LobbyError::InsufficientCards {
                    requested: count,
                    remaining: deck.remaining,
                });
            }
            (deck.deck_id.clone(), player_name)
        };

        // Provider round trip with no room lock held.
        let outcome = self.provider.draw(&deck_id, count).await?;

        let pile_size = {
            let mut room = entry.write().await;
            let deck = room.deck.as_mut().ok_or(LobbyError::DeckConflict)?;
            if deck.deck_id != deck_id {
                // A reshuffle landed while the draw was in flight; these
                // cards belong to a deck the room no longer uses.
                return Err(LobbyError::DeckConflict);
            }
            deck.apply_draw(player_id, outcome.cards.clone(), outcome.remaining);
            let pile_size = deck.pile_len(player_id);
            room.touch();
            pile_size
        };

        let _ = self.event_bus.publish(RoomEvent::CardsDrawn {
            room_id: room_id.clone(),
            player_name,
            count: outcome.cards.len(),
            remaining: outcome.remaining,
            timestamp: Utc::now(),
        });

        tracing::info!(%room_id, dealt = outcome.cards.len(), remaining = outcome.remaining, "cards drawn");
        Ok(DrawnCards {
            cards: outcome.cards,
            remaining: outcome.remaining,
            pile_size,
        })
    }

    /// Moves a card within the requesting player's pile.
    ///
    /// Pure local permutation; no upstream call.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::Unauthorized`], [`LobbyError::DeckNotReady`],
    /// or [`LobbyError::IndexOutOfRange`].
    pub async fn reorder_pile(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        from: usize,
        to: usize,
    ) -> Result<Vec<Card>, LobbyError> {
        let entry = self.registry.get(room_id).await?;

        let (pile, player_name) = {
            let mut room = entry.write().await;
            if !self.sessions.validate(&room, player_id) {
                return Err(LobbyError::Unauthorized {
                    room_id: room_id.clone(),
                });
            }
            let player_name = room
                .member(player_id)
                .map_or_else(String::new, |p| p.player_name.clone());
            let deck = room
                .deck
                .as_mut()
                .ok_or_else(|| LobbyError::DeckNotReady(room_id.clone()))?;
            let pile = deck.reorder(player_id, from, to)?.to_vec();
            room.touch();
            (pile, player_name)
        };

        let _ = self.event_bus.publish(RoomEvent::PileReordered {
            room_id: room_id.clone(),
            player_name,
            pile_size: pile.len(),
            timestamp: Utc::now(),
        });

        tracing::debug!(%room_id, from, to, "pile reordered");
        Ok(pile)
    }

    /// Returns the deck status plus the caller's own pile.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RoomNotFound`], [`LobbyError::Unauthorized`],
    /// or [`LobbyError::DeckNotReady`].
    pub async fn deck_view(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<DeckView, LobbyError> {
        let entry = self.registry.get(room_id).await?;
        let room = entry.read().await;
        if !self.sessions.validate(&room, player_id) {
            return Err(LobbyError::Unauthorized {
                room_id: room_id.clone(),
            });
        }
        let deck = room
            .deck
            .as_ref()
            .ok_or_else(|| LobbyError::DeckNotReady(room_id.clone()))?;
        Ok(DeckView {
            shuffled: deck.shuffled,
            remaining: deck.remaining,
            pile: deck.pile(player_id).to_vec(),
        })
    }

    /// Reclaims rooms idle longer than `ttl`, publishing a close event for
    /// each. Returns the number of rooms removed.
    pub async fn sweep_expired(&self, ttl: Duration) -> usize {
        let removed = self.registry.sweep_expired(ttl).await;
        let count = removed.len();
        for summary in removed {
            tracing::info!(room_id = %summary.id, "idle room reclaimed");
            let _ = self.event_bus.publish(RoomEvent::RoomClosed {
                room_id: summary.id,
                reason: CloseReason::Expired,
                timestamp: Utc::now(),
            });
        }
        count
    }
}

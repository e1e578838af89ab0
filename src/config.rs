//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with sensible defaults for local runs.

use std::net::SocketAddr;

/// Top-level lobby configuration.
///
/// Loaded once at startup via [`LobbyConfig::from_env`].
#[derive(Debug, Clone)]
pub struct LobbyConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Base URL of the external deck API (deckofcardsapi.com-compatible).
    pub deck_api_url: String,

    /// Request timeout for deck API calls, in milliseconds.
    pub deck_api_timeout_ms: u64,

    /// Idle time after which a room is reclaimed, in seconds.
    pub room_ttl_secs: u64,

    /// Interval between expiry sweeps, in seconds.
    pub room_sweep_interval_secs: u64,

    /// Maximum players per room. `0` disables the limit.
    pub max_players_per_room: usize,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,
}

impl LobbyConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let deck_api_url = std::env::var("DECK_API_URL")
            .unwrap_or_else(|_| "https://deckofcardsapi.com/api/deck".to_string());

        let deck_api_timeout_ms = parse_env("DECK_API_TIMEOUT_MS", 5_000);
        let room_ttl_secs = parse_env("ROOM_TTL_SECS", 1_800);
        let room_sweep_interval_secs = parse_env("ROOM_SWEEP_INTERVAL_SECS", 900);
        let max_players_per_room = parse_env("MAX_PLAYERS_PER_ROOM", 4);
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 10_000);

        Ok(Self {
            listen_addr,
            deck_api_url,
            deck_api_timeout_ms,
            room_ttl_secs,
            room_sweep_interval_secs,
            max_players_per_room,
            event_bus_capacity,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

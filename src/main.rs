//! cardroom-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints, plus the
//! background idle-room expiry sweep.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cardroom_gateway::api;
use cardroom_gateway::app_state::AppState;
use cardroom_gateway::config::LobbyConfig;
use cardroom_gateway::domain::{EventBus, RoomRegistry};
use cardroom_gateway::provider::CardsApiProvider;
use cardroom_gateway::service::{LobbySynchronizer, RoomService};
use cardroom_gateway::session::SessionIssuer;
use cardroom_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = LobbyConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(addr = %config.listen_addr, "starting cardroom-gateway");

    // Build domain layer
    let registry = Arc::new(RoomRegistry::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build the deck provider
    let provider = Arc::new(CardsApiProvider::new(
        config.deck_api_url.clone(),
        Duration::from_millis(config.deck_api_timeout_ms),
    )?);

    // Build service layer
    let room_service = Arc::new(RoomService::new(
        Arc::clone(&registry),
        SessionIssuer::new(),
        provider,
        event_bus.clone(),
        config.max_players_per_room,
    ));
    let lobby = Arc::new(LobbySynchronizer::new(Arc::clone(&registry), &event_bus));

    // Background idle-room expiry sweep
    let sweep_service = Arc::clone(&room_service);
    let ttl = chrono::Duration::seconds(i64::try_from(config.room_ttl_secs).unwrap_or(i64::MAX));
    let sweep_interval = Duration::from_secs(config.room_sweep_interval_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            let removed = sweep_service.sweep_expired(ttl).await;
            if removed > 0 {
                tracing::info!(removed, "expired rooms reclaimed");
            }
        }
    });

    // Build application state
    let app_state = AppState {
        room_service,
        lobby,
        event_bus,
    };

    // Build router
    #[allow(unused_mut)]
    let mut app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    {
        use utoipa::OpenApi;
        app = app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        );
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

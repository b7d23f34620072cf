mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod routes;
mod ws;

use axum::http::HeaderValue;
use config::Config;
use db::DocStore;
use docs::ApiDoc;
use routes::create_routes;
use std::panic;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use ws::registry::SessionRegistry;

/// Shared state for every handler: the persistence adapter and the live
/// session registry. Both are owned here and injected, not ambient globals.
pub struct AppState {
    pub store: DocStore,
    pub registry: SessionRegistry,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "syncpad=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });

    // Pick the persistence backend: Postgres when configured, in-memory otherwise
    let store = match &config.db_url {
        Some(db_url) => match DocStore::connect(db_url, config.lifecycle).await {
            Ok(store) => {
                info!("Database initialized successfully");
                store
            }
            Err(e) => {
                error!("Failed to initialize database: {}", e);
                warn!("Falling back to the in-memory document store");
                DocStore::memory(config.lifecycle)
            }
        },
        None => {
            warn!("No database URL configured - documents will not survive a restart");
            DocStore::memory(config.lifecycle)
        }
    };

    let app_state = Arc::new(AppState {
        store,
        registry: SessionRegistry::new(),
    });

    // Combine all routes
    let app_routes = create_routes(app_state)
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&config))
        // Add tracing layer
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("🚀 Server running on http://{}", config.server_address());
    info!("📡 WebSocket available at ws://{}/ws", config.server_address());
    info!("📚 Swagger UI available at http://{}/swagger", config.server_address());

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}

fn cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

//! chatlog - conversation log service
//!
//! Keeps an ordered conversation of messages and responses, persists it as a
//! single snapshot, and produces responses either with local text transforms
//! or by calling an image generation endpoint.

mod action;
mod api;
mod config;
mod history;
mod image;
mod runtime;
mod state_machine;
mod store;

use api::{create_router, AppState};
use config::AppConfig;
use history::ChatHistory;
use image::{HttpImageClient, LoggingImageClient};
use runtime::traits::{SnapshotStore, SystemClock, UuidGenerator};
use runtime::Dispatcher;
use std::net::SocketAddr;
use std::sync::Arc;
use store::MemoryStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatlog=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env();

    // A store that cannot be opened degrades to memory for this session
    tracing::info!(
        backend = ?config.store_backend,
        path = %config.store_path.display(),
        "Opening snapshot store"
    );
    let snapshot_store: Arc<dyn SnapshotStore> =
        match store::open(config.store_backend, &config.store_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open snapshot store, keeping history in memory");
                Arc::new(MemoryStore::new())
            }
        };

    let history = ChatHistory::load(
        snapshot_store,
        Arc::new(SystemClock),
        Arc::new(UuidGenerator),
    )
    .shared();

    let image_client = HttpImageClient::new(config.image_url.clone(), config.image_timeout)?;
    tracing::info!(
        url = %config.image_url,
        timeout_secs = config.image_timeout.map(|t| t.as_secs()),
        "Image client configured"
    );

    let dispatcher = Dispatcher::new(
        history,
        Arc::new(LoggingImageClient::new(Arc::new(image_client))),
        config.response_delay,
    );
    let state = AppState::new(dispatcher);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("chatlog listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

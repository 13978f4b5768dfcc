//! Breed Service Library
//!
//! Filtered, paginated CRUD access to the breed catalogue over a document
//! store, exposed as an HTTP API. Also provides the bulk seed command.

pub mod api;
pub mod config;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::{AppError, AppResult, StoreConfig};
use domain::Breed;

use crate::api::{create_router, AppState};
use crate::config::BreedServiceConfig;
use crate::repository::{BreedRepository, BreedStore};
use crate::service::{BreedManager, BreedService, InstrumentedBreedService};
use crate::store::{Collection, MongoCollection};

/// Build the repository over the given collection.
pub fn build_repository(
    collection: Arc<dyn Collection<Breed>>,
    config: &StoreConfig,
) -> Arc<dyn BreedRepository> {
    Arc::new(BreedStore::new(collection, config))
}

/// Build the service stack used by the HTTP layer.
pub fn build_service(repo: Arc<dyn BreedRepository>) -> Arc<dyn BreedService> {
    let manager = Arc::new(BreedManager::new(repo));
    Arc::new(InstrumentedBreedService::new(manager))
}

async fn connect_repository(config: &StoreConfig) -> AppResult<Arc<dyn BreedRepository>> {
    let collection = MongoCollection::<Breed>::connect(config).await?;
    Ok(build_repository(Arc::new(collection), config))
}

/// Run the HTTP server until Ctrl+C.
pub async fn run_server(config: BreedServiceConfig) -> AppResult<()> {
    info!(service = %config.service.service_name, store = ?config.store, "Starting server...");

    let repo = connect_repository(&config.store).await?;
    let state = AppState::new(build_service(repo));

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.service.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

/// Seed the store from a JSON file; returns the number of inserted breeds.
pub async fn run_seed(config: BreedServiceConfig, file: &Path) -> AppResult<usize> {
    let repo = connect_repository(&config.store).await?;
    seed::seed_breeds(repo.as_ref(), file).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Received shutdown signal, draining connections...");
}

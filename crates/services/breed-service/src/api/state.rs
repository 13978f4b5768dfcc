//! Application state for dependency injection.

use std::sync::Arc;

use crate::service::BreedService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub breed_service: Arc<dyn BreedService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(breed_service: Arc<dyn BreedService>) -> Self {
        Self { breed_service }
    }
}

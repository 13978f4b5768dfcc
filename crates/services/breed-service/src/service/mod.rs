//! Service layer for business logic.

mod breed_service;
mod instrumented;

pub use breed_service::{BreedManager, BreedService};
pub use instrumented::InstrumentedBreedService;

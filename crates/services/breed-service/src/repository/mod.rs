//! Repository layer for data access.

mod breed_repository;

pub use breed_repository::{BreedRepository, BreedStore};

#[cfg(any(test, feature = "test-utils"))]
pub use breed_repository::MockBreedRepository;

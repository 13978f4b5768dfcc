//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod breed;
pub mod constants;
pub mod error;
pub mod pagination;

pub use breed::{Breed, BreedQuery, CreateBreed, CreationType, UpdateBreed};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use pagination::{paginate, PageWindow, Paginated, PaginationData, PaginationQuery};

//! Bulk loading of breeds from a JSON file.

use std::path::Path;

use chrono::{DateTime, Utc};

use common::{AppError, AppResult};
use domain::{Breed, CreateBreed};

use crate::repository::BreedRepository;

/// Parse a JSON array of breeds. Timestamps in the file are ignored.
pub fn parse_breeds(data: &[u8]) -> AppResult<Vec<CreateBreed>> {
    serde_json::from_slice(data)
        .map_err(|e| AppError::invalid_argument(format!("Invalid seed data: {}", e)))
}

/// Stamp every breed with the same creation time
pub fn stamp_breeds(breeds: Vec<CreateBreed>, now: DateTime<Utc>) -> Vec<Breed> {
    breeds.into_iter().map(|b| b.into_breed(now)).collect()
}

/// Read `path` and insert its breeds in a single round trip.
///
/// Returns the number of inserted breeds.
pub async fn seed_breeds(repo: &dyn BreedRepository, path: &Path) -> AppResult<usize> {
    tracing::info!(file = %path.display(), "Seeding breeds");

    let data = tokio::fs::read(path).await.map_err(|e| {
        AppError::internal(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let breeds = stamp_breeds(parse_breeds(&data)?, Utc::now());

    if breeds.is_empty() {
        tracing::warn!(file = %path.display(), "Seed file contains no breeds");
        return Ok(0);
    }

    let ack = repo.insert_many(breeds).await?;
    tracing::info!(inserted = ack.keys.len(), "Seeded breeds");

    Ok(ack.keys.len())
}

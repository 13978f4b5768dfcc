//! Breed service - Handles breed catalogue use cases.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::AppResult;
use domain::{paginate, Breed, BreedQuery, CreateBreed, Paginated, PaginationQuery, UpdateBreed};

use crate::repository::BreedRepository;
use crate::store::{creation_type_filter, merge_update};

/// Breed service trait for dependency injection.
#[async_trait]
pub trait BreedService: Send + Sync {
    /// List one page of breeds matching the query, ordered by name
    async fn list_breeds(
        &self,
        pagination: PaginationQuery,
        query: BreedQuery,
    ) -> AppResult<Paginated<Breed>>;

    /// Get breed by unique name
    async fn get_breed(&self, unique_name: &str) -> AppResult<Breed>;

    /// Create a new breed, stamping both timestamps
    async fn create_breed(&self, request: CreateBreed) -> AppResult<Breed>;

    /// Apply a sparse patch and return the stored result
    async fn update_breed(&self, unique_name: &str, patch: UpdateBreed) -> AppResult<Breed>;

    /// Permanently delete a breed
    async fn delete_breed(&self, unique_name: &str) -> AppResult<()>;
}

/// Concrete implementation of BreedService using repository.
pub struct BreedManager {
    repo: Arc<dyn BreedRepository>,
}

impl BreedManager {
    /// Create new breed service instance with repository
    pub fn new(repo: Arc<dyn BreedRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl BreedService for BreedManager {
    async fn list_breeds(
        &self,
        pagination: PaginationQuery,
        query: BreedQuery,
    ) -> AppResult<Paginated<Breed>> {
        let filter = creation_type_filter(query.creation_type);

        // Count first so metadata is known even when the whole set is returned
        let total = self.repo.count_matching(filter.clone()).await?;
        let window = paginate(&pagination, total)?;

        let breeds = self
            .repo
            .read_many(filter, window.skip, window.limit)
            .await?;

        Ok(Paginated::new(breeds, window.metadata))
    }

    async fn get_breed(&self, unique_name: &str) -> AppResult<Breed> {
        self.repo.read_one_by_key(unique_name).await
    }

    async fn create_breed(&self, request: CreateBreed) -> AppResult<Breed> {
        let breed = request.into_breed(Utc::now());
        let unique_name = breed.unique_name.clone();

        self.repo.insert_one(breed).await?;
        self.repo.read_one_by_key(&unique_name).await
    }

    async fn update_breed(&self, unique_name: &str, patch: UpdateBreed) -> AppResult<Breed> {
        let update = merge_update(&patch, Utc::now());

        self.repo.update_one(unique_name, update).await?;
        self.repo.read_one_by_key(unique_name).await
    }

    async fn delete_breed(&self, unique_name: &str) -> AppResult<()> {
        self.repo.delete_one(unique_name).await?;
        Ok(())
    }
}

//! Logging decorator for [`BreedService`].

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use common::AppResult;
use domain::{Breed, BreedQuery, CreateBreed, Paginated, PaginationQuery, UpdateBreed};

use super::BreedService;

/// Wraps a service and logs each operation with its elapsed time.
pub struct InstrumentedBreedService {
    inner: Arc<dyn BreedService>,
}

impl InstrumentedBreedService {
    pub fn new(inner: Arc<dyn BreedService>) -> Self {
        Self { inner }
    }
}

async fn timed<T, F>(operation: &'static str, key: &str, future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    let start = Instant::now();
    let result = future.await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => tracing::info!(operation, key, elapsed_ms, "Breed operation completed"),
        Err(e) => tracing::warn!(
            operation,
            key,
            elapsed_ms,
            error = %e,
            "Breed operation failed"
        ),
    }

    result
}

#[async_trait]
impl BreedService for InstrumentedBreedService {
    async fn list_breeds(
        &self,
        pagination: PaginationQuery,
        query: BreedQuery,
    ) -> AppResult<Paginated<Breed>> {
        tracing::debug!(?pagination, ?query, "Listing breeds");

        let result = timed("list", "", self.inner.list_breeds(pagination, query)).await;
        if let Ok(page) = &result {
            tracing::debug!(
                returned = page.data.len(),
                total = page.meta.total,
                page = page.meta.page,
                "Breed page read"
            );
        }
        result
    }

    async fn get_breed(&self, unique_name: &str) -> AppResult<Breed> {
        timed("get", unique_name, self.inner.get_breed(unique_name)).await
    }

    async fn create_breed(&self, request: CreateBreed) -> AppResult<Breed> {
        let key = request.unique_name.clone();
        timed("create", &key, self.inner.create_breed(request)).await
    }

    async fn update_breed(&self, unique_name: &str, patch: UpdateBreed) -> AppResult<Breed> {
        timed("update", unique_name, self.inner.update_breed(unique_name, patch)).await
    }

    async fn delete_breed(&self, unique_name: &str) -> AppResult<()> {
        timed("delete", unique_name, self.inner.delete_breed(unique_name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockBreedRepository;
    use crate::service::BreedManager;
    use common::AppError;

    #[tokio::test]
    async fn test_decorator_passes_results_through() {
        let mut mock_repo = MockBreedRepository::new();
        mock_repo
            .expect_read_one_by_key()
            .returning(|_| Err(AppError::NotFound));
        mock_repo
            .expect_delete_one()
            .returning(|_| Ok(Default::default()));

        let service =
            InstrumentedBreedService::new(Arc::new(BreedManager::new(Arc::new(mock_repo))));

        assert!(matches!(
            service.get_breed("pug").await,
            Err(AppError::NotFound)
        ));
        assert!(service.delete_breed("pug").await.is_ok());
    }
}

//! Breed repository: one bounded store round trip per operation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt, StoreConfig};
use domain::{Breed, FIELD_NAME};

use crate::store::{
    Collection, DeleteAck, Filter, FindOptions, InsertAck, Sort, Update, UpdateAck,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Breed repository trait for dependency injection.
///
/// Key-based operations fail with `NotFound` when no breed has the key.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BreedRepository: Send + Sync {
    /// Count breeds matching the filter
    async fn count_matching(&self, filter: Filter) -> AppResult<u64>;

    /// Read a window of matching breeds, ordered by name
    async fn read_many(&self, filter: Filter, skip: u64, limit: u64) -> AppResult<Vec<Breed>>;

    /// Read a breed by its unique name
    async fn read_one_by_key(&self, unique_name: &str) -> AppResult<Breed>;

    /// Insert exactly one breed
    async fn insert_one(&self, breed: Breed) -> AppResult<InsertAck>;

    /// Insert a batch of breeds in a single round trip
    async fn insert_many(&self, breeds: Vec<Breed>) -> AppResult<InsertAck>;

    /// Apply an update to the breed with the given unique name
    async fn update_one(&self, unique_name: &str, update: Update) -> AppResult<UpdateAck>;

    /// Hard delete the breed with the given unique name
    async fn delete_one(&self, unique_name: &str) -> AppResult<DeleteAck>;
}

/// Concrete implementation of BreedRepository over a document collection
pub struct BreedStore {
    collection: Arc<dyn Collection<Breed>>,
    timeout: Duration,
}

impl BreedStore {
    /// Create new repository instance
    pub fn new(collection: Arc<dyn Collection<Breed>>, config: &StoreConfig) -> Self {
        Self {
            collection,
            timeout: config.operation_timeout(),
        }
    }

    /// Run a store round trip under the configured deadline
    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, future).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Store deadline exceeded"
                );
                Err(AppError::Timeout)
            }
        }
    }
}

#[async_trait]
impl BreedRepository for BreedStore {
    async fn count_matching(&self, filter: Filter) -> AppResult<u64> {
        self.bounded("count", self.collection.count(&filter)).await
    }

    async fn read_many(&self, filter: Filter, skip: u64, limit: u64) -> AppResult<Vec<Breed>> {
        let options = FindOptions {
            sort: Some(Sort::ascending(FIELD_NAME)),
            skip,
            limit: Some(limit),
        };

        self.bounded("find", self.collection.find(&filter, &options))
            .await
    }

    async fn read_one_by_key(&self, unique_name: &str) -> AppResult<Breed> {
        let filter = Filter::by_key::<Breed>(unique_name);
        self.bounded("find_one", self.collection.find_one(&filter))
            .await?
            .ok_or_not_found()
    }

    async fn insert_one(&self, breed: Breed) -> AppResult<InsertAck> {
        let ack = self
            .bounded("insert_one", self.collection.insert(vec![breed]))
            .await?;

        if ack.keys.len() != 1 {
            return Err(AppError::store(format!(
                "expected 1 inserted key, store acknowledged {}",
                ack.keys.len()
            )));
        }

        Ok(ack)
    }

    async fn insert_many(&self, breeds: Vec<Breed>) -> AppResult<InsertAck> {
        let expected = breeds.len();
        let ack = self
            .bounded("insert_many", self.collection.insert(breeds))
            .await?;

        if ack.keys.len() != expected {
            return Err(AppError::store(format!(
                "expected {} inserted keys, store acknowledged {}",
                expected,
                ack.keys.len()
            )));
        }

        Ok(ack)
    }

    async fn update_one(&self, unique_name: &str, update: Update) -> AppResult<UpdateAck> {
        let filter = Filter::by_key::<Breed>(unique_name);
        let ack = self
            .bounded("update_one", self.collection.update_one(&filter, &update))
            .await?;

        if ack.matched == 0 {
            return Err(AppError::NotFound);
        }

        Ok(ack)
    }

    async fn delete_one(&self, unique_name: &str) -> AppResult<DeleteAck> {
        let filter = Filter::by_key::<Breed>(unique_name);
        let ack = self
            .bounded("delete_one", self.collection.delete_one(&filter))
            .await?;

        if ack.deleted == 0 {
            return Err(AppError::NotFound);
        }

        Ok(ack)
    }
}

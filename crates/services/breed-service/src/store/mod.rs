//! Document collection abstraction and its adapters.
//!
//! [`Collection`] is the minimal capability set the repository needs from a
//! document store. Each target store provides one adapter; the in-memory
//! adapter backs the tests.

mod document;
mod filter;
mod memory;
mod mongo;
mod update;

use async_trait::async_trait;

use common::AppResult;

pub use document::Document;
pub use filter::{creation_type_filter, FieldValue, Filter};
pub use memory::InMemoryCollection;
pub use mongo::MongoCollection;
pub use update::{merge_update, Update};

/// Ascending ordering for reads. Adapters break ties on the document key so
/// that skip/limit windows stay stable across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
}

impl Sort {
    pub fn ascending(field: &'static str) -> Self {
        Self { field }
    }
}

/// Read options for [`Collection::find`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<Sort>,
    pub skip: u64,
    /// `None` reads every remaining document
    pub limit: Option<u64>,
}

/// Acknowledgment of an insert: the keys of the documents written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertAck {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateAck {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteAck {
    pub deleted: u64,
}

/// Generic, key-typed document collection.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    /// Count documents matching the filter
    async fn count(&self, filter: &Filter) -> AppResult<u64>;

    /// Read documents matching the filter
    async fn find(&self, filter: &Filter, options: &FindOptions) -> AppResult<Vec<T>>;

    /// Read the first document matching the filter
    async fn find_one(&self, filter: &Filter) -> AppResult<Option<T>>;

    /// Insert one or more documents; fails with `Conflict` on a duplicate key
    async fn insert(&self, documents: Vec<T>) -> AppResult<InsertAck>;

    /// Apply a set clause to the first document matching the filter
    async fn update_one(&self, filter: &Filter, update: &Update) -> AppResult<UpdateAck>;

    /// Delete the first document matching the filter
    async fn delete_one(&self, filter: &Filter) -> AppResult<DeleteAck>;
}

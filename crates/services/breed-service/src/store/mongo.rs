//! MongoDB collection adapter.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document as BsonDocument};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::{AppError, AppResult, StoreConfig};

use super::{
    Collection, DeleteAck, Document, FieldValue, Filter, FindOptions, InsertAck, Sort, Update,
    UpdateAck,
};

const APP_NAME: &str = "breed-service";

/// Added to the operation deadline so the repository's own deadline fires first
const DRIVER_TIMEOUT_GRACE: Duration = Duration::from_millis(500);


/// Collection backed by a MongoDB collection.
///
/// Documents are stored with their serde representation; the store generates
/// `_id` and a unique index on [`Document::KEY_FIELD`] enforces key uniqueness.
pub struct MongoCollection<T: Send + Sync> {
    collection: mongodb::Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Document + Serialize + DeserializeOwned + Unpin,
{
    /// Connect using the given configuration and ensure the key index exists.
    pub async fn connect(config: &StoreConfig) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(driver_timeout(config));
        options.server_selection_timeout = Some(driver_timeout(config));

        let client = Client::with_options(options)?;
        let collection = client
            .database(&config.database)
            .collection::<T>(&config.collection);

        let store = Self { collection };
        store.ensure_key_index().await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Document store connected"
        );

        Ok(store)
    }

    async fn ensure_key_index(&self) -> AppResult<()> {
        let mut keys = BsonDocument::new();
        keys.insert(T::KEY_FIELD, 1);

        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

/// The driver encodes skip as a signed 64-bit integer; anything beyond that
/// already skips every document
fn driver_skip(skip: u64) -> u64 {
    skip.min(i64::MAX as u64)
}

fn driver_timeout(config: &StoreConfig) -> Duration {
    config.operation_timeout().saturating_add(DRIVER_TIMEOUT_GRACE)
}

/// Convert a driver error, naming the collection's entity in conflicts
fn store_error<T: Document>(err: mongodb::error::Error) -> AppError {
    match AppError::from(err) {
        AppError::Conflict(_) => AppError::conflict(T::ENTITY),
        other => other,
    }
}

fn to_bson(value: &FieldValue) -> AppResult<Bson> {
    let converted = match value {
        FieldValue::Text(text) => Ok(Bson::String(text.clone())),
        // Same representation serde produces for the stored document
        FieldValue::Timestamp(at) => bson::to_bson(at),
    };
    converted.map_err(|e| AppError::store(format!("Failed to encode field value: {}", e)))
}

fn filter_document(filter: &Filter) -> AppResult<BsonDocument> {
    let mut document = BsonDocument::new();
    match filter {
        Filter::MatchAll => {}
        Filter::Eq { field, value } => {
            document.insert(*field, to_bson(value)?);
        }
    }
    Ok(document)
}

fn sort_document(sort: &Sort, key_field: &str) -> BsonDocument {
    let mut document = BsonDocument::new();
    document.insert(sort.field, 1);
    if sort.field != key_field {
        document.insert(key_field, 1);
    }
    document
}

fn update_document(update: &Update) -> AppResult<BsonDocument> {
    let mut set = BsonDocument::new();
    for (&field, value) in update.set_clause() {
        set.insert(field, to_bson(value)?);
    }

    let mut document = BsonDocument::new();
    document.insert("$set", set);
    Ok(document)
}

#[async_trait]
impl<T> Collection<T> for MongoCollection<T>
where
    T: Document + Serialize + DeserializeOwned + Unpin,
{
    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(filter_document(filter)?)
            .await?;
        Ok(count)
    }

    async fn find(&self, filter: &Filter, options: &FindOptions) -> AppResult<Vec<T>> {
        let mut find = self
            .collection
            .find(filter_document(filter)?)
            .skip(driver_skip(options.skip));
        if let Some(sort) = &options.sort {
            find = find.sort(sort_document(sort, T::KEY_FIELD));
        }
        if let Some(limit) = options.limit {
            let limit = i64::try_from(limit)
                .map_err(|_| AppError::invalid_argument("limit is too large"))?;
            find = find.limit(limit);
        }

        let cursor = find.await?;
        let documents: Vec<T> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<T>> {
        let document = self.collection.find_one(filter_document(filter)?).await?;
        Ok(document)
    }

    async fn insert(&self, documents: Vec<T>) -> AppResult<InsertAck> {
        match documents.as_slice() {
            [] => Ok(InsertAck::default()),
            [document] => {
                self.collection
                    .insert_one(document)
                    .await
                    .map_err(store_error::<T>)?;
                Ok(InsertAck {
                    keys: vec![document.key().to_string()],
                })
            }
            _ => {
                let result = self
                    .collection
                    .insert_many(&documents)
                    .await
                    .map_err(store_error::<T>)?;
                let mut indexes: Vec<usize> = result.inserted_ids.into_keys().collect();
                indexes.sort_unstable();

                let keys = indexes
                    .into_iter()
                    .filter_map(|i| documents.get(i))
                    .map(|doc| doc.key().to_string())
                    .collect();
                Ok(InsertAck { keys })
            }
        }
    }

    async fn update_one(&self, filter: &Filter, update: &Update) -> AppResult<UpdateAck> {
        let result = self
            .collection
            .update_one(filter_document(filter)?, update_document(update)?)
            .await?;

        Ok(UpdateAck {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: &Filter) -> AppResult<DeleteAck> {
        let result = self.collection.delete_one(filter_document(filter)?).await?;
        Ok(DeleteAck {
            deleted: result.deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::{Breed, FIELD_CREATION_TYPE, FIELD_NAME, FIELD_UNIQUE_NAME, FIELD_UPDATED_AT};

    #[test]
    fn test_match_all_is_empty_document() {
        assert!(filter_document(&Filter::MatchAll).unwrap().is_empty());
    }

    #[test]
    fn test_equality_filter() {
        let document = filter_document(&Filter::eq(FIELD_CREATION_TYPE, "custom")).unwrap();
        assert_eq!(document.get_str(FIELD_CREATION_TYPE).unwrap(), "custom");
        assert_eq!(document.len(), 1);
    }

    #[test]
    fn test_sort_adds_key_tiebreaker() {
        let document = sort_document(&Sort::ascending(FIELD_NAME), FIELD_UNIQUE_NAME);
        let keys: Vec<_> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![FIELD_NAME, FIELD_UNIQUE_NAME]);
        assert_eq!(document.get_i32(FIELD_NAME).unwrap(), 1);
    }

    #[test]
    fn test_driver_timeout_outlasts_operation_deadline() {
        let config = StoreConfig {
            operation_timeout_ms: 1_000,
            ..StoreConfig::default()
        };
        assert!(driver_timeout(&config) > config.operation_timeout());
    }

    #[test]
    fn test_skip_fits_driver_range() {
        assert_eq!(driver_skip(40), 40);
        assert!(i64::try_from(driver_skip(u64::MAX)).is_ok());
    }

    #[test]
    fn test_duplicate_key_names_entity() {
        let write_error: mongodb::error::WriteError =
            bson::from_document(bson::doc! { "code": 11000, "errmsg": "E11000" }).unwrap();
        let err = mongodb::error::Error::from(mongodb::error::ErrorKind::Write(
            mongodb::error::WriteFailure::WriteError(write_error),
        ));

        let err = store_error::<Breed>(err);
        assert_eq!(err.user_message(), "Breed already exists");
    }

    #[test]
    fn test_update_wraps_set_clause() {
        let at = Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap();
        let update = Update::new().set(FIELD_NAME, "Pug").set(FIELD_UPDATED_AT, at);

        let document = update_document(&update).unwrap();
        let set = document.get_document("$set").unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str(FIELD_NAME).unwrap(), "Pug");
        assert_eq!(set.get(FIELD_UPDATED_AT), Some(&bson::to_bson(&at).unwrap()));
    }
}

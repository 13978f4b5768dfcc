//! In-memory collection adapter.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};

use super::{Collection, DeleteAck, Document, Filter, FindOptions, InsertAck, Update, UpdateAck};

/// Collection kept in process memory, keyed by the document key.
pub struct InMemoryCollection<T> {
    documents: RwLock<BTreeMap<String, T>>,
}

impl<T: Document> InMemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a collection pre-populated with documents (later duplicates win)
    pub fn with_documents(documents: impl IntoIterator<Item = T>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.key().to_string(), doc))
            .collect();

        Self {
            documents: RwLock::new(documents),
        }
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl<T: Document> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn compare<T: Document>(a: &T, b: &T, options: &FindOptions) -> Ordering {
    match options.sort {
        Some(sort) => a
            .field(sort.field)
            .cmp(&b.field(sort.field))
            .then_with(|| a.key().cmp(b.key())),
        None => a.key().cmp(b.key()),
    }
}

#[async_trait]
impl<T: Document> Collection<T> for InMemoryCollection<T> {
    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        let documents = self.documents.read().await;
        Ok(documents.values().filter(|doc| filter.matches(*doc)).count() as u64)
    }

    async fn find(&self, filter: &Filter, options: &FindOptions) -> AppResult<Vec<T>> {
        let documents = self.documents.read().await;
        let mut matched: Vec<&T> = documents.values().filter(|doc| filter.matches(*doc)).collect();
        matched.sort_by(|a, b| compare(*a, *b, options));

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(matched.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<T>> {
        let documents = self.documents.read().await;
        Ok(documents.values().find(|doc| filter.matches(*doc)).cloned())
    }

    async fn insert(&self, documents: Vec<T>) -> AppResult<InsertAck> {
        let mut stored = self.documents.write().await;

        {
            let mut seen = HashSet::new();
            for doc in &documents {
                if stored.contains_key(doc.key()) || !seen.insert(doc.key()) {
                    return Err(AppError::conflict(T::ENTITY));
                }
            }
        }

        let mut keys = Vec::with_capacity(documents.len());
        for doc in documents {
            keys.push(doc.key().to_string());
            stored.insert(doc.key().to_string(), doc);
        }

        Ok(InsertAck { keys })
    }

    async fn update_one(&self, filter: &Filter, update: &Update) -> AppResult<UpdateAck> {
        let mut stored = self.documents.write().await;

        let Some(current) = stored.values_mut().find(|doc| filter.matches(&**doc)) else {
            return Ok(UpdateAck::default());
        };

        let mut updated = current.clone();
        updated.apply(update)?;
        *current = updated;

        Ok(UpdateAck {
            matched: 1,
            modified: 1,
        })
    }

    async fn delete_one(&self, filter: &Filter) -> AppResult<DeleteAck> {
        let mut stored = self.documents.write().await;

        let key = stored
            .values()
            .find(|doc| filter.matches(*doc))
            .map(|doc| doc.key().to_string());

        match key {
            Some(key) => {
                stored.remove(&key);
                Ok(DeleteAck { deleted: 1 })
            }
            None => Ok(DeleteAck::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{creation_type_filter, Sort};
    use chrono::Utc;
    use domain::{Breed, CreateBreed, CreationType, FIELD_NAME};

    fn breed(unique_name: &str, name: &str, creation_type: CreationType) -> Breed {
        CreateBreed {
            unique_name: unique_name.to_string(),
            name: name.to_string(),
            url: format!("https://en.wikipedia.org/wiki/{}", name),
            creation_type,
        }
        .into_breed(Utc::now())
    }

    fn collection() -> InMemoryCollection<Breed> {
        InMemoryCollection::with_documents(vec![
            breed("whippet", "Whippet", CreationType::Original),
            breed("akita", "Akita", CreationType::Original),
            breed("maltese", "Maltese", CreationType::Custom),
            breed("beagle", "Beagle", CreationType::Original),
        ])
    }

    #[tokio::test]
    async fn test_count_with_filter() {
        let collection = collection();
        assert_eq!(collection.count(&Filter::MatchAll).await.unwrap(), 4);
        assert_eq!(
            collection
                .count(&creation_type_filter(Some(CreationType::Custom)))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_find_sorts_then_windows() {
        let options = FindOptions {
            sort: Some(Sort::ascending(FIELD_NAME)),
            skip: 1,
            limit: Some(2),
        };

        let found = collection().find(&Filter::MatchAll, &options).await.unwrap();
        let names: Vec<_> = found.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Beagle", "Maltese"]);
    }

    #[tokio::test]
    async fn test_skip_past_end_is_empty() {
        let options = FindOptions {
            sort: Some(Sort::ascending(FIELD_NAME)),
            skip: u64::MAX,
            limit: Some(20),
        };

        let found = collection().find(&Filter::MatchAll, &options).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_sort_ties_break_on_key() {
        let collection = InMemoryCollection::with_documents(vec![
            breed("spaniel_b", "Spaniel", CreationType::Original),
            breed("spaniel_a", "Spaniel", CreationType::Original),
        ]);
        let options = FindOptions {
            sort: Some(Sort::ascending(FIELD_NAME)),
            ..FindOptions::default()
        };

        let found = collection.find(&Filter::MatchAll, &options).await.unwrap();
        assert_eq!(found[0].unique_name, "spaniel_a");
        assert_eq!(found[1].unique_name, "spaniel_b");
    }

    #[tokio::test]
    async fn test_insert_duplicate_key_conflicts() {
        let collection = collection();
        let result = collection
            .insert(vec![breed("akita", "Akita Inu", CreationType::Custom)])
            .await;

        assert!(matches!(result, Err(AppError::Conflict(ref entity)) if entity == "Breed"));
        assert_eq!(collection.len().await, 4);
    }

    #[tokio::test]
    async fn test_insert_duplicate_within_batch_writes_nothing() {
        let collection = InMemoryCollection::new();
        let result = collection
            .insert(vec![
                breed("pug", "Pug", CreationType::Original),
                breed("pug", "Pug", CreationType::Original),
            ])
            .await;

        assert!(result.is_err());
        assert!(collection.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_matches() {
        let collection = collection();
        let missing = Filter::by_key::<Breed>("poodle");

        let ack = collection
            .update_one(&missing, &Update::new().set(FIELD_NAME, "Poodle"))
            .await
            .unwrap();
        assert_eq!(ack.matched, 0);

        let ack = collection.delete_one(&missing).await.unwrap();
        assert_eq!(ack.deleted, 0);

        let ack = collection
            .delete_one(&Filter::by_key::<Breed>("akita"))
            .await
            .unwrap();
        assert_eq!(ack.deleted, 1);
        assert_eq!(collection.len().await, 3);
    }
}

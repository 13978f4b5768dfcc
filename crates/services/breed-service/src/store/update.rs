//! Update operations and the partial update merge.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use domain::{UpdateBreed, FIELD_NAME, FIELD_UPDATED_AT, FIELD_URL};

use super::FieldValue;

/// A set clause applied to a single document.
///
/// Fields absent from the clause are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    set: BTreeMap<&'static str, FieldValue>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &'static str, value: impl Into<FieldValue>) -> Self {
        self.set.insert(field, value.into());
        self
    }

    pub fn set_clause(&self) -> &BTreeMap<&'static str, FieldValue> {
        &self.set
    }

    /// Names of the fields written by this update, in sorted order
    pub fn fields(&self) -> Vec<&'static str> {
        self.set.keys().copied().collect()
    }
}

/// Merge a sparse patch into an update.
///
/// Only non-empty fields of the patch are written; `updated_at` is always
/// written, so a patch with nothing in it still refreshes the timestamp.
pub fn merge_update(patch: &UpdateBreed, updated_at: DateTime<Utc>) -> Update {
    let mut update = Update::new().set(FIELD_UPDATED_AT, updated_at);

    if let Some(name) = non_empty(&patch.name) {
        update = update.set(FIELD_NAME, name);
    }
    if let Some(url) = non_empty(&patch.url) {
        update = update.set(FIELD_URL, url);
    }

    update
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only_patch_sets_name_and_timestamp() {
        let now = Utc::now();
        let patch = UpdateBreed {
            name: Some("Toy Poodle".to_string()),
            url: None,
        };

        let update = merge_update(&patch, now);

        assert_eq!(update.fields(), vec![FIELD_NAME, FIELD_UPDATED_AT]);
        assert_eq!(
            update.set_clause().get(FIELD_NAME),
            Some(&FieldValue::Text("Toy Poodle".to_string()))
        );
        assert_eq!(
            update.set_clause().get(FIELD_UPDATED_AT),
            Some(&FieldValue::Timestamp(now))
        );
    }

    #[test]
    fn test_empty_strings_are_ignored() {
        let patch = UpdateBreed {
            name: Some(String::new()),
            url: Some(String::new()),
        };

        let update = merge_update(&patch, Utc::now());
        assert_eq!(update.fields(), vec![FIELD_UPDATED_AT]);
    }

    #[test]
    fn test_empty_patch_is_a_timestamp_only_update() {
        let update = merge_update(&UpdateBreed::default(), Utc::now());
        assert_eq!(update.fields(), vec![FIELD_UPDATED_AT]);
    }

    #[test]
    fn test_full_patch() {
        let patch = UpdateBreed {
            name: Some("Pug".to_string()),
            url: Some("https://example.com/pug".to_string()),
        };

        let update = merge_update(&patch, Utc::now());
        assert_eq!(update.fields(), vec![FIELD_NAME, FIELD_UPDATED_AT, FIELD_URL]);
    }
}

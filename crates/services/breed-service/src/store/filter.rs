//! Store-level predicates.

use chrono::{DateTime, Utc};
use domain::{CreationType, FIELD_CREATION_TYPE};

use super::Document;

/// A scalar value held by a document field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// Predicate understood by every collection adapter.
///
/// `MatchAll` must be implemented natively by each adapter; an empty or
/// missing predicate is never used to mean "everything".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    MatchAll,
    Eq {
        field: &'static str,
        value: FieldValue,
    },
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Filter::Eq {
            field,
            value: value.into(),
        }
    }

    /// Equality on the document's unique key
    pub fn by_key<T: Document>(key: &str) -> Self {
        Filter::eq(T::KEY_FIELD, key)
    }

    /// Evaluate the predicate against a document in memory
    pub fn matches<T: Document>(&self, document: &T) -> bool {
        match self {
            Filter::MatchAll => true,
            Filter::Eq { field, value } => document.field(field).as_ref() == Some(value),
        }
    }
}

/// Translate the optional creation type restriction into a predicate.
pub fn creation_type_filter(creation_type: Option<CreationType>) -> Filter {
    match creation_type {
        Some(creation_type) => Filter::eq(FIELD_CREATION_TYPE, creation_type.as_str()),
        None => Filter::MatchAll,
    }
}

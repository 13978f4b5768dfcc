//! Mapping between domain entities and store documents.

use common::{AppError, AppResult};
use domain::{
    Breed, FIELD_CREATED_AT, FIELD_CREATION_TYPE, FIELD_NAME, FIELD_UNIQUE_NAME,
    FIELD_UPDATED_AT, FIELD_URL,
};

use super::{FieldValue, Update};

/// An entity that can live in a [`Collection`](super::Collection).
///
/// Field names are the serialized (wire) names, so the same names work for
/// in-memory evaluation and for native store queries.
pub trait Document: Clone + Send + Sync + 'static {
    /// Field holding the unique, immutable key
    const KEY_FIELD: &'static str;

    /// Entity name used in conflict messages
    const ENTITY: &'static str;

    fn key(&self) -> &str;

    /// Read a field by its serialized name
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Apply a set clause in place
    fn apply(&mut self, update: &Update) -> AppResult<()>;
}

impl Document for Breed {
    const KEY_FIELD: &'static str = FIELD_UNIQUE_NAME;
    const ENTITY: &'static str = "Breed";

    fn key(&self) -> &str {
        &self.unique_name
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            FIELD_UNIQUE_NAME => Some(self.unique_name.as_str().into()),
            FIELD_NAME => Some(self.name.as_str().into()),
            FIELD_URL => Some(self.url.as_str().into()),
            FIELD_CREATION_TYPE => Some(self.creation_type.as_str().into()),
            FIELD_CREATED_AT => Some(self.created_at.into()),
            FIELD_UPDATED_AT => Some(self.updated_at.into()),
            _ => None,
        }
    }

    fn apply(&mut self, update: &Update) -> AppResult<()> {
        for (&field, value) in update.set_clause() {
            match (field, value) {
                (FIELD_NAME, FieldValue::Text(name)) => self.name = name.clone(),
                (FIELD_URL, FieldValue::Text(url)) => self.url = url.clone(),
                (FIELD_CREATION_TYPE, FieldValue::Text(creation_type)) => {
                    self.creation_type = creation_type.parse()?
                }
                (FIELD_CREATED_AT, FieldValue::Timestamp(at)) => self.created_at = *at,
                (FIELD_UPDATED_AT, FieldValue::Timestamp(at)) => self.updated_at = *at,
                (FIELD_UNIQUE_NAME, _) => {
                    return Err(AppError::invalid_argument("uniqueName cannot be changed"))
                }
                (field, value) => {
                    return Err(AppError::invalid_argument(format!(
                        "cannot set {} to {:?}",
                        field, value
                    )))
                }
            }
        }
        Ok(())
    }
}

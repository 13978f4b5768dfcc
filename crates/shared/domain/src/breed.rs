//! Breed domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{CREATION_TYPE_CUSTOM, CREATION_TYPE_ORIGINAL};
use crate::error::{DomainError, DomainResult};

/// How a breed entered the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CreationType {
    Original,
    Custom,
}

impl CreationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreationType::Original => CREATION_TYPE_ORIGINAL,
            CreationType::Custom => CREATION_TYPE_CUSTOM,
        }
    }
}

impl FromStr for CreationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CREATION_TYPE_ORIGINAL => Ok(CreationType::Original),
            CREATION_TYPE_CUSTOM => Ok(CreationType::Custom),
            other => Err(DomainError::invalid_argument(format!(
                "creationType must be one of 'original' or 'custom', got '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for CreationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breed domain entity
///
/// `unique_name` is the lookup key and never changes once the breed exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Breed {
    #[cfg_attr(feature = "openapi", schema(example = "affenpinscher"))]
    pub unique_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Affenpinscher"))]
    pub name: String,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://en.wikipedia.org/wiki/Affenpinscher")
    )]
    pub url: String,
    pub creation_type: CreationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Breed creation data transfer object
///
/// Timestamps are not part of the payload; any supplied by a client are dropped
/// during deserialization and stamped by the service instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateBreed {
    pub unique_name: String,
    pub name: String,
    pub url: String,
    pub creation_type: CreationType,
}

impl CreateBreed {
    /// Build the stored entity with both timestamps set to `now`
    pub fn into_breed(self, now: DateTime<Utc>) -> Breed {
        Breed {
            unique_name: self.unique_name,
            name: self.name,
            url: self.url,
            creation_type: self.creation_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Breed update data transfer object (sparse patch)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateBreed {
    /// New display name, ignored when empty
    pub name: Option<String>,
    /// New reference URL, ignored when empty
    pub url: Option<String>,
}

/// Restrictions applied when listing breeds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreedQuery {
    pub creation_type: Option<CreationType>,
}

impl BreedQuery {
    /// Parse the raw `creationType` query value. Empty means no restriction.
    pub fn from_param(creation_type: Option<&str>) -> DomainResult<Self> {
        let creation_type = match creation_type.map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse()?),
        };

        Ok(Self { creation_type })
    }
}

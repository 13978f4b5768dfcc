//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Creation Types
// =============================================================================

/// Breeds imported from the reference data set
pub const CREATION_TYPE_ORIGINAL: &str = "original";

/// Breeds added through the API
pub const CREATION_TYPE_CUSTOM: &str = "custom";

/// All valid creation type values
pub const VALID_CREATION_TYPES: &[&str] = &[CREATION_TYPE_ORIGINAL, CREATION_TYPE_CUSTOM];

/// Check if a creation type value is valid
pub fn is_valid_creation_type(creation_type: &str) -> bool {
    VALID_CREATION_TYPES.contains(&creation_type)
}

// =============================================================================
// Document Fields
// =============================================================================

pub const FIELD_UNIQUE_NAME: &str = "uniqueName";
pub const FIELD_NAME: &str = "name";
pub const FIELD_URL: &str = "url";
pub const FIELD_CREATION_TYPE: &str = "creationType";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

//! Breed handlers.

use std::borrow::Cow;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateUrl, ValidationError};

use common::{ApiResponse, AppResult};
use domain::{
    is_valid_creation_type, Breed, BreedQuery, CreateBreed, PaginationQuery, UpdateBreed,
};

use crate::api::extractors::{QueryPairs, ValidatedJson};
use crate::api::state::AppState;

static UNIQUE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_]+$").expect("valid uniqueName regex"));

fn validate_creation_type(creation_type: &str) -> Result<(), ValidationError> {
    if is_valid_creation_type(creation_type) {
        Ok(())
    } else {
        Err(ValidationError::new("creation_type")
            .with_message(Cow::from("creationType must be 'original' or 'custom'")))
    }
}

/// Empty means "leave unchanged", anything else must be a URL
fn validate_patch_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || url.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message(Cow::from("url must be a valid URL")))
    }
}

/// Breed creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBreedRequest {
    /// Immutable lookup key
    #[validate(regex(
        path = *UNIQUE_NAME_PATTERN,
        message = "uniqueName may only contain letters and underscores"
    ))]
    #[schema(example = "tibetan_mastiff")]
    pub unique_name: String,
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Tibetan Mastiff")]
    pub name: String,
    #[validate(url(message = "url must be a valid URL"))]
    #[schema(example = "https://en.wikipedia.org/wiki/Tibetan_Mastiff")]
    pub url: String,
    #[validate(custom(function = "validate_creation_type"))]
    #[schema(example = "original")]
    pub creation_type: String,
}

impl CreateBreedRequest {
    fn into_create_breed(self) -> AppResult<CreateBreed> {
        Ok(CreateBreed {
            creation_type: self.creation_type.parse()?,
            unique_name: self.unique_name,
            name: self.name,
            url: self.url,
        })
    }
}

/// Breed update request; empty or missing fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBreedRequest {
    #[schema(example = "Do-Khyi")]
    pub name: Option<String>,
    #[validate(custom(function = "validate_patch_url"))]
    #[schema(example = "https://en.wikipedia.org/wiki/Tibetan_Mastiff")]
    pub url: Option<String>,
}

impl From<UpdateBreedRequest> for UpdateBreed {
    fn from(request: UpdateBreedRequest) -> Self {
        Self {
            name: request.name,
            url: request.url,
        }
    }
}

/// Query parameters for listing breeds.
///
/// Kept as raw strings: malformed numbers fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBreedsParams {
    /// Page number, 1-indexed (default 1)
    pub page: Option<String>,
    /// Page size (default 20)
    pub limit: Option<String>,
    /// `false` returns the whole match set as one page (default true)
    pub paginate: Option<String>,
    /// `original` or `custom`; also accepted as `classification`
    #[param(rename = "creationType")]
    pub creation_type: Option<String>,
}

impl ListBreedsParams {
    /// Build from raw query pairs. The first occurrence of a key wins, and
    /// `classification` is only consulted when `creationType` is absent.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        let mut classification = None;

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "paginate" => &mut params.paginate,
                "creationType" => &mut params.creation_type,
                "classification" => &mut classification,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        if params.creation_type.is_none() {
            params.creation_type = classification;
        }
        params
    }

    fn pagination(&self) -> PaginationQuery {
        PaginationQuery::from_params(
            self.page.as_deref(),
            self.limit.as_deref(),
            self.paginate.as_deref(),
        )
    }

    fn query(&self) -> AppResult<BreedQuery> {
        Ok(BreedQuery::from_param(self.creation_type.as_deref())?)
    }
}

/// Create breed routes
pub fn breed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_breeds).post(create_breed))
        .route(
            "/:unique_name",
            get(get_breed).patch(update_breed).delete(delete_breed),
        )
}

/// List breeds, ordered by name
#[utoipa::path(
    get,
    path = "/breeds",
    tag = "Breeds",
    params(ListBreedsParams),
    responses(
        (status = 200, description = "Page of breeds with pagination metadata", body = Vec<Breed>),
        (status = 422, description = "Unknown creationType")
    )
)]
pub async fn list_breeds(
    State(state): State<AppState>,
    QueryPairs(pairs): QueryPairs,
) -> AppResult<ApiResponse<Vec<Breed>>> {
    let params = ListBreedsParams::from_pairs(pairs);
    let page = state
        .breed_service
        .list_breeds(params.pagination(), params.query()?)
        .await?;

    Ok(ApiResponse::paginated(page))
}

/// Get breed by unique name
#[utoipa::path(
    get,
    path = "/breeds/{unique_name}",
    tag = "Breeds",
    params(
        ("unique_name" = String, Path, description = "Breed unique name")
    ),
    responses(
        (status = 200, description = "Breed", body = Breed),
        (status = 404, description = "Breed not found")
    )
)]
pub async fn get_breed(
    State(state): State<AppState>,
    Path(unique_name): Path<String>,
) -> AppResult<ApiResponse<Breed>> {
    let breed = state.breed_service.get_breed(&unique_name).await?;
    Ok(ApiResponse::success(breed))
}

/// Create a breed
#[utoipa::path(
    post,
    path = "/breeds",
    tag = "Breeds",
    request_body = CreateBreedRequest,
    responses(
        (status = 201, description = "Breed created", body = Breed),
        (status = 409, description = "uniqueName already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_breed(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBreedRequest>,
) -> AppResult<ApiResponse<Breed>> {
    let breed = state
        .breed_service
        .create_breed(payload.into_create_breed()?)
        .await?;

    Ok(ApiResponse::created(breed))
}

/// Partially update a breed
#[utoipa::path(
    patch,
    path = "/breeds/{unique_name}",
    tag = "Breeds",
    params(
        ("unique_name" = String, Path, description = "Breed unique name")
    ),
    request_body = UpdateBreedRequest,
    responses(
        (status = 200, description = "Breed updated", body = Breed),
        (status = 404, description = "Breed not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_breed(
    State(state): State<AppState>,
    Path(unique_name): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBreedRequest>,
) -> AppResult<ApiResponse<Breed>> {
    let breed = state
        .breed_service
        .update_breed(&unique_name, payload.into())
        .await?;

    Ok(ApiResponse::success(breed))
}

/// Delete a breed
#[utoipa::path(
    delete,
    path = "/breeds/{unique_name}",
    tag = "Breeds",
    params(
        ("unique_name" = String, Path, description = "Breed unique name")
    ),
    responses(
        (status = 200, description = "Breed deleted"),
        (status = 404, description = "Breed not found")
    )
)]
pub async fn delete_breed(
    State(state): State<AppState>,
    Path(unique_name): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.breed_service.delete_breed(&unique_name).await?;
    Ok(ApiResponse::empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(unique_name: &str, url: &str, creation_type: &str) -> CreateBreedRequest {
        CreateBreedRequest {
            unique_name: unique_name.to_string(),
            name: "Tibetan Mastiff".to_string(),
            url: url.to_string(),
            creation_type: creation_type.to_string(),
        }
    }

    #[test]
    fn test_create_request_validation() {
        let valid = create_request(
            "tibetan_mastiff",
            "https://en.wikipedia.org/wiki/Tibetan_Mastiff",
            "original",
        );
        assert!(valid.validate().is_ok());

        let bad_key = create_request("tibetan-mastiff-2", "https://example.com", "original");
        assert!(bad_key.validate().is_err());

        let bad_url = create_request("tibetan_mastiff", "not a url", "original");
        assert!(bad_url.validate().is_err());

        let bad_type = create_request("tibetan_mastiff", "https://example.com", "hybrid");
        assert!(bad_type.validate().is_err());
    }

    #[test]
    fn test_update_request_allows_empty_url() {
        let request = UpdateBreedRequest {
            name: None,
            url: Some(String::new()),
        };
        assert!(request.validate().is_ok());

        let request = UpdateBreedRequest {
            name: None,
            url: Some("nope".to_string()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_list_params_are_lenient() {
        let params = ListBreedsParams {
            page: Some("abc".to_string()),
            limit: Some("-3".to_string()),
            paginate: Some("maybe".to_string()),
            creation_type: Some(String::new()),
        };

        let pagination = params.pagination();
        assert_eq!(pagination.normalized_page(), 1);
        assert_eq!(pagination.normalized_limit(), 20);
        assert!(pagination.paginate);
        assert_eq!(params.query().unwrap(), BreedQuery::default());
    }

    #[test]
    fn test_list_params_reject_unknown_creation_type() {
        let params = ListBreedsParams {
            creation_type: Some("hybrid".to_string()),
            ..ListBreedsParams::default()
        };
        assert!(params.query().is_err());
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_list_params_first_value_wins() {
        let params = ListBreedsParams::from_pairs(pairs(&[
            ("page", "1"),
            ("limit", "5"),
            ("page", "2"),
            ("limit", "abc"),
        ]));

        assert_eq!(params.page.as_deref(), Some("1"));
        assert_eq!(params.limit.as_deref(), Some("5"));
    }

    #[test]
    fn test_list_params_classification_alias() {
        let params = ListBreedsParams::from_pairs(pairs(&[("classification", "custom")]));
        assert_eq!(params.creation_type.as_deref(), Some("custom"));

        let params = ListBreedsParams::from_pairs(pairs(&[
            ("classification", "original"),
            ("creationType", "custom"),
            ("unrelated", "x"),
        ]));
        assert_eq!(params.creation_type.as_deref(), Some("custom"));
    }
}

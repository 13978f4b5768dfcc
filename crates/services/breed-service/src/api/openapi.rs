//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::breed_handler::{CreateBreedRequest, UpdateBreedRequest};
use crate::api::handlers::health_handler::HealthResponse;
use domain::{Breed, CreationType, PaginationData};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health_handler::health_check,
        crate::api::handlers::breed_handler::list_breeds,
        crate::api::handlers::breed_handler::get_breed,
        crate::api::handlers::breed_handler::create_breed,
        crate::api::handlers::breed_handler::update_breed,
        crate::api::handlers::breed_handler::delete_breed,
    ),
    components(
        schemas(
            Breed,
            CreationType,
            PaginationData,
            CreateBreedRequest,
            UpdateBreedRequest,
            HealthResponse,
        )
    ),
    tags(
        (name = "Breeds", description = "Breed catalogue endpoints"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

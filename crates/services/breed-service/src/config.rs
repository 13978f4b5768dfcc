//! Breed service configuration.

use std::env;

use common::{ServiceConfig, StoreConfig};

const SERVICE_NAME: &str = "breed-service";

/// Breed service configuration.
#[derive(Debug, Clone)]
pub struct BreedServiceConfig {
    pub service: ServiceConfig,
    pub store: StoreConfig,
}

impl BreedServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let service_defaults = ServiceConfig::default();
        let store_defaults = StoreConfig::default();

        Self {
            service: ServiceConfig {
                service_name: SERVICE_NAME.to_string(),
                host: env::var("SERVER_HOST").unwrap_or(service_defaults.host),
                port: env::var("PORT")
                    .or_else(|_| env::var("SERVER_PORT"))
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(service_defaults.port),
            },
            store: StoreConfig {
                uri: env::var("MONGODB_URI").unwrap_or(store_defaults.uri),
                database: env::var("MONGODB_DATABASE").unwrap_or(store_defaults.database),
                collection: env::var("MONGODB_COLLECTION").unwrap_or(store_defaults.collection),
                operation_timeout_ms: env::var("STORE_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(store_defaults.operation_timeout_ms),
            },
        }
    }
}

impl Default for BreedServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: SERVICE_NAME.to_string(),
                ..ServiceConfig::default()
            },
            store: StoreConfig::default(),
        }
    }
}

//! Shared configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServiceConfig {
    /// Get the full server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Document store configuration.
///
/// Built once at start-up and handed to the store constructors.
#[derive(Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Connection string, may carry credentials
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Deadline for a single store round trip
    pub operation_timeout_ms: u64,
}

impl StoreConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &"[REDACTED]")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("operation_timeout_ms", &self.operation_timeout_ms)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "breeds_db".to_string(),
            collection: "breeds".to_string(),
            operation_timeout_ms: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_debug_hides_uri() {
        let config = StoreConfig {
            uri: "mongodb://admin:hunter2@db:27017".to_string(),
            ..StoreConfig::default()
        };

        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("breeds_db"));
    }

    #[test]
    fn test_operation_timeout_is_in_millis() {
        let config = StoreConfig {
            operation_timeout_ms: 1500,
            ..StoreConfig::default()
        };
        assert_eq!(config.operation_timeout(), Duration::from_millis(1500));
    }
}

//! Rental service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

/// Rental service configuration.
#[derive(Debug, Clone)]
pub struct RentalServiceConfig {
    /// Service name and log level
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl RentalServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                log_level: env::var("RENTAL_SERVICE_LOG_LEVEL")
                    .unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("RENTAL_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.min_connections),
            },
        }
    }
}

impl Default for RentalServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "rental-service".to_string(),
                log_level: "info".to_string(),
            },
            database: DatabaseConfig::default(),
        }
    }
}

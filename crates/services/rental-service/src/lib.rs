//! Rental Service Library
//!
//! Rental eligibility and lifecycle: who may open a rental, and how rentals
//! are looked up and closed. Stores are injected, so the same service runs
//! against Postgres (SeaORM) or the in-memory stores used in tests.

pub mod clock;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::config::RentalServiceConfig;
use crate::infra::Database;
use crate::repository::{RentalStore, UserStore};
use crate::service::RentalManager;

/// Connect to the database and wire the SeaORM stores into a [`RentalManager`].
pub async fn connect(config: &RentalServiceConfig) -> Result<RentalManager, Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    db.ping().await?;
    let db_conn = db.get_connection();

    // Create repositories and service
    let rental_repo = Arc::new(RentalStore::new(db_conn.clone()));
    let user_repo = Arc::new(UserStore::new(db_conn));
    info!(service = %config.service.service_name, "Rental service ready");

    Ok(RentalManager::new(rental_repo, user_repo))
}

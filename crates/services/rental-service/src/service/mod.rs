//! Service layer - business logic.

mod rental_service;

pub use rental_service::{RentalManager, RentalService};

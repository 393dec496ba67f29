//! Repository layer for data access.

pub mod entities;
mod memory;
mod rental_repository;
mod user_repository;

pub use memory::{InMemoryRentalStore, InMemoryUserStore};
pub use rental_repository::{RentalRepository, RentalStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests
#[cfg(any(test, feature = "test-utils"))]
pub use rental_repository::MockRentalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

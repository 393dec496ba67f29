//! Domain layer - Rental and user entities and the rules that govern them.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Nothing here performs I/O or reads the system clock; callers pass "now" in.

pub mod age;
pub mod constants;
pub mod error;
pub mod rental;
pub mod user;

pub use age::{age_on, is_under_age};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use rental::{ensure_no_open_rental, CreateRental, FinishRental, NewRental, Rental};
pub use user::User;

//! Domain-level constants.
//!
//! These constants define business rules and the messages attached to them.

// =============================================================================
// Eligibility
// =============================================================================

/// Minimum age, in whole years, required to open a rental
pub const MIN_RENTAL_AGE: i32 = 18;

// =============================================================================
// Entity names (used in not-found messages)
// =============================================================================

pub const ENTITY_RENTAL: &str = "Rental";

pub const ENTITY_USER: &str = "User";

// =============================================================================
// Error messages
// =============================================================================

pub const MSG_PENDENT_RENTAL: &str = "The user already have a rental!";

pub const MSG_INSUFFICIENT_AGE: &str = "The user is under the minimum rental age!";

pub const MSG_RENTAL_CLOSED: &str = "The rental is already closed!";

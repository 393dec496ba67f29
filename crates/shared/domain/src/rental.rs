//! Rental domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DomainError, DomainResult};

/// Rental domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: i32,
    /// Rental start timestamp
    pub date: DateTime<Utc>,
    /// Set when the rental is closed
    pub end_date: Option<DateTime<Utc>>,
    pub user_id: i32,
    pub closed: bool,
}

impl Rental {
    /// Check if the rental is still open
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Fail with [`DomainError::RentalClosed`] if the rental is closed
    pub fn ensure_open(&self) -> DomainResult<()> {
        if self.closed {
            return Err(DomainError::RentalClosed);
        }
        Ok(())
    }

    /// Close the rental at `now`.
    ///
    /// `closed` only ever goes from `false` to `true`; a second close is rejected.
    pub fn close(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_open()?;

        self.closed = true;
        self.end_date = Some(now);
        Ok(())
    }
}

/// Rental creation request.
///
/// `check` is for callers parsing outside input; the service itself only
/// asks the user store whether the id exists.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRental {
    /// Renting user
    #[validate(range(min = 1, message = "userId must be a positive id"))]
    pub user_id: i32,
}

impl CreateRental {
    pub fn new(user_id: i32) -> Self {
        Self { user_id }
    }

    /// Validate request fields
    pub fn check(&self) -> DomainResult<()> {
        self.validate()
            .map_err(|e| DomainError::validation(e.to_string()))
    }
}

/// Data handed to the rental store to persist a new rental.
///
/// The store assigns the id; the rental starts open with no end date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRental {
    pub user_id: i32,
    pub date: DateTime<Utc>,
}

impl NewRental {
    /// Build the stored rental once the store has assigned an id
    pub fn into_rental(self, id: i32) -> Rental {
        Rental {
            id,
            date: self.date,
            end_date: None,
            user_id: self.user_id,
            closed: false,
        }
    }
}

/// Updates applied by the rental store when a rental is closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishRental {
    pub end_date: DateTime<Utc>,
}

/// Fail with [`DomainError::PendentRental`] if any of `rentals` is still open.
pub fn ensure_no_open_rental(rentals: &[Rental]) -> DomainResult<()> {
    if rentals.iter().any(Rental::is_open) {
        return Err(DomainError::PendentRental);
    }
    Ok(())
}

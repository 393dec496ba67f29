//! Rental service - Eligibility checks and rental lifecycle.
//!
//! Creating a rental runs three checks in a fixed order and stops at the
//! first failure: the user exists, the user is old enough, the user has no
//! open rental. Nothing is written unless all three pass.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{
    ensure_no_open_rental, CreateRental, FinishRental, NewRental, Rental, User, ENTITY_RENTAL,
    ENTITY_USER,
};

use crate::clock::{Clock, SystemClock};
use crate::repository::{RentalRepository, UserRepository};

/// Rental service trait for dependency injection.
#[async_trait]
pub trait RentalService: Send + Sync {
    /// Get rental by ID
    async fn get_rental_by_id(&self, id: i32) -> AppResult<Rental>;

    /// Get the user a rental would be opened for
    async fn get_user_for_rental(&self, user_id: i32) -> AppResult<User>;

    /// Fail with `PendentRental` if the user has an open rental
    async fn check_user_able_to_rental(&self, user_id: i32) -> AppResult<()>;

    /// Whether the user is below the minimum rental age today
    fn user_is_under_age(&self, user: &User) -> bool;

    /// Open a new rental after all eligibility checks pass
    async fn create_rental(&self, input: CreateRental) -> AppResult<Rental>;

    /// Close a rental
    async fn finish_rental(&self, rental_id: i32) -> AppResult<Rental>;

    /// All rentals of an existing user, oldest first
    async fn list_user_rentals(&self, user_id: i32) -> AppResult<Vec<Rental>>;

    /// The user's open rental, if any
    async fn get_open_rental(&self, user_id: i32) -> AppResult<Option<Rental>>;
}

/// Concrete implementation of RentalService using repositories.
pub struct RentalManager {
    rentals: Arc<dyn RentalRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl RentalManager {
    /// Create new rental service instance reading the system clock
    pub fn new(rentals: Arc<dyn RentalRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self::with_clock(rentals, users, Arc::new(SystemClock))
    }

    /// Create new rental service instance with an explicit clock
    pub fn with_clock(
        rentals: Arc<dyn RentalRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rentals,
            users,
            clock,
        }
    }
}

#[async_trait]
impl RentalService for RentalManager {
    async fn get_rental_by_id(&self, id: i32) -> AppResult<Rental> {
        debug!(rental_id = id, "Looking up rental");
        self.rentals
            .find_by_id(id)
            .await?
            .ok_or_not_found(ENTITY_RENTAL)
    }

    async fn get_user_for_rental(&self, user_id: i32) -> AppResult<User> {
        debug!(user_id, "Looking up user");
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_not_found(ENTITY_USER)
    }

    async fn check_user_able_to_rental(&self, user_id: i32) -> AppResult<()> {
        let rentals = self.rentals.find_by_user_id(user_id).await?;

        if let Err(e) = ensure_no_open_rental(&rentals) {
            warn!(user_id, "Rental refused: user already has an open rental");
            return Err(e.into());
        }
        Ok(())
    }

    fn user_is_under_age(&self, user: &User) -> bool {
        user.is_under_age_on(self.clock.today())
    }

    async fn create_rental(&self, input: CreateRental) -> AppResult<Rental> {
        let user = self.get_user_for_rental(input.user_id).await?;

        if self.user_is_under_age(&user) {
            warn!(user_id = user.id, "Rental refused: user is under age");
            return Err(AppError::InsufficientAge);
        }

        self.check_user_able_to_rental(user.id).await?;

        let rental = self
            .rentals
            .create(NewRental {
                user_id: user.id,
                date: self.clock.now(),
            })
            .await?;

        info!(rental_id = rental.id, user_id = rental.user_id, "Rental created");
        Ok(rental)
    }

    async fn finish_rental(&self, rental_id: i32) -> AppResult<Rental> {
        let rental = self.get_rental_by_id(rental_id).await?;

        if let Err(e) = rental.ensure_open() {
            warn!(rental_id, "Rental is already closed");
            return Err(e.into());
        }

        // Another finish may have closed it since the lookup
        let Some(finished) = self
            .rentals
            .finish(rental_id, FinishRental { end_date: self.clock.now() })
            .await?
        else {
            warn!(rental_id, "Rental was closed concurrently");
            return Err(AppError::RentalClosed);
        };

        info!(rental_id, user_id = finished.user_id, "Rental finished");
        Ok(finished)
    }

    async fn list_user_rentals(&self, user_id: i32) -> AppResult<Vec<Rental>> {
        self.get_user_for_rental(user_id).await?;
        self.rentals.find_by_user_id(user_id).await
    }

    async fn get_open_rental(&self, user_id: i32) -> AppResult<Option<Rental>> {
        let rentals = self.rentals.find_by_user_id(user_id).await?;
        Ok(rentals.into_iter().find(Rental::is_open))
    }
}

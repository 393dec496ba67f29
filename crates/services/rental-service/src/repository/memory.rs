//! In-memory stores.
//!
//! Same contract as the SeaORM stores. Useful for tests and local runs
//! without a database.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use super::{RentalRepository, UserRepository};
use common::{AppError, AppResult};
use domain::{FinishRental, NewRental, Rental, User};

struct RentalTable {
    next_id: i32,
    rows: BTreeMap<i32, Rental>,
}

/// Rental store held in process memory.
///
/// Check-then-insert in `create` runs under a single lock.
pub struct InMemoryRentalStore {
    table: Mutex<RentalTable>,
}

impl InMemoryRentalStore {
    pub fn new() -> Self {
        Self::with_rentals(Vec::new())
    }

    /// Seed the store. New ids continue after the highest seeded id.
    pub fn with_rentals(rentals: Vec<Rental>) -> Self {
        let next_id = rentals.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let rows = rentals.into_iter().map(|r| (r.id, r)).collect();

        Self {
            table: Mutex::new(RentalTable { next_id, rows }),
        }
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, RentalTable>> {
        self.table
            .lock()
            .map_err(|_| AppError::internal("rental store lock poisoned"))
    }
}

impl Default for InMemoryRentalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentalStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Rental>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Vec<Rental>> {
        let table = self.lock()?;
        let mut rentals: Vec<Rental> = table
            .rows
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rentals.sort_by_key(|r| (r.date, r.id));

        Ok(rentals)
    }

    async fn create(&self, rental: NewRental) -> AppResult<Rental> {
        let mut table = self.lock()?;

        if table
            .rows
            .values()
            .any(|r| r.user_id == rental.user_id && r.is_open())
        {
            return Err(AppError::PendentRental);
        }

        let id = table.next_id;
        table.next_id += 1;

        let created = rental.into_rental(id);
        table.rows.insert(id, created.clone());

        Ok(created)
    }

    async fn finish(&self, id: i32, update: FinishRental) -> AppResult<Option<Rental>> {
        let mut table = self.lock()?;

        Ok(table.rows.get_mut(&id).and_then(|rental| {
            rental.close(update.end_date).ok()?;
            Some(rental.clone())
        }))
    }
}

/// User store held in process memory.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i32, User>>,
}

impl InMemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    /// Add or replace a user
    pub fn insert(&self, user: User) -> AppResult<()> {
        self.users
            .write()
            .map_err(|_| AppError::internal("user store lock poisoned"))?
            .insert(user.id, user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AppError::internal("user store lock poisoned"))?;

        Ok(users.get(&id).cloned())
    }
}

//! Rental repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, IsolationLevel, NotSet, PaginatorTrait, QueryFilter, QueryOrder, RuntimeErr, Set,
    TransactionTrait,
};
use tracing::warn;

use super::entities::rental::{self, ActiveModel, Entity as RentalEntity};
use common::{AppError, AppResult};
use domain::{FinishRental, NewRental, Rental};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// SQLSTATE for a serializable transaction that lost a conflict
const SERIALIZATION_FAILURE: &str = "40001";

/// Attempts at the check-and-insert in `RentalStore::create`
const CREATE_ATTEMPTS: u32 = 3;

/// Rental repository trait for dependency injection.
///
/// `create` must refuse a second open rental for the same user atomically,
/// since the service's own check and the insert are separate calls.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Find rental by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Rental>>;

    /// All rentals of a user, oldest first
    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Vec<Rental>>;

    /// Persist a new open rental.
    ///
    /// Fails with `AppError::PendentRental` if the user already has an open rental.
    async fn create(&self, rental: NewRental) -> AppResult<Rental>;

    /// Close an open rental and return it.
    ///
    /// Returns `None` when no open rental has that id, so of two racing
    /// finishes only one gets the closed row back.
    async fn finish(&self, id: i32, update: FinishRental) -> AppResult<Option<Rental>>;
}

fn is_serialization_failure(err: &DbErr) -> bool {
    match err {
        DbErr::Conn(RuntimeErr::SqlxError(e))
        | DbErr::Exec(RuntimeErr::SqlxError(e))
        | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .is_some_and(|code| code == SERIALIZATION_FAILURE),
        _ => false,
    }
}

/// Concrete implementation of RentalRepository
pub struct RentalStore {
    db: DatabaseConnection,
}

impl RentalStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One serializable check-and-insert. `None` if the user has an open rental.
    async fn insert_if_no_open_rental(
        &self,
        new_rental: &NewRental,
    ) -> Result<Option<Rental>, DbErr> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::Serializable),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        let open = RentalEntity::find()
            .filter(rental::Column::UserId.eq(new_rental.user_id))
            .filter(rental::Column::Closed.eq(false))
            .count(&txn)
            .await?;

        if open > 0 {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            return Ok(None);
        }

        let active_model = ActiveModel {
            id: NotSet,
            date: Set(new_rental.date),
            end_date: Set(None),
            user_id: Set(new_rental.user_id),
            closed: Set(false),
        };

        // Dropping `txn` on error rolls it back
        let model = active_model.insert(&txn).await?;
        txn.commit().await?;

        Ok(Some(Rental::from(model)))
    }
}

#[async_trait]
impl RentalRepository for RentalStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Rental>> {
        let result = RentalEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Rental::from))
    }

    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Vec<Rental>> {
        let models = RentalEntity::find()
            .filter(rental::Column::UserId.eq(user_id))
            .order_by_asc(rental::Column::Date)
            .order_by_asc(rental::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Rental::from).collect())
    }

    async fn create(&self, new_rental: NewRental) -> AppResult<Rental> {
        // The loser of a serialization conflict re-runs the open-rental check
        let mut attempt = 1;
        loop {
            match self.insert_if_no_open_rental(&new_rental).await {
                Ok(Some(rental)) => return Ok(rental),
                Ok(None) => return Err(AppError::PendentRental),
                Err(e) if attempt < CREATE_ATTEMPTS && is_serialization_failure(&e) => {
                    warn!(
                        user_id = new_rental.user_id,
                        attempt, "Serialization conflict creating rental, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(AppError::from(e)),
            }
        }
    }

    async fn finish(&self, id: i32, update: FinishRental) -> AppResult<Option<Rental>> {
        // Only an open row is touched, so `closed` flips at most once
        let result = RentalEntity::update_many()
            .col_expr(rental::Column::Closed, Expr::value(true))
            .col_expr(rental::Column::EndDate, Expr::value(update.end_date))
            .filter(rental::Column::Id.eq(id))
            .filter(rental::Column::Closed.eq(false))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_db_errors_are_not_serialization_failures() {
        assert!(!is_serialization_failure(&DbErr::Custom(
            "could not serialize access".to_string()
        )));
        assert!(!is_serialization_failure(&DbErr::Exec(RuntimeErr::Internal(
            "40001".to_string()
        ))));
        assert!(!is_serialization_failure(&DbErr::RecordNotInserted));
    }
}

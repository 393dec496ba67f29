//! Rental lifecycle tests against the in-memory stores.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use common::AppError;
use domain::{CreateRental, Rental, User};
use rental_service_lib::clock::FixedClock;
use rental_service_lib::repository::{InMemoryRentalStore, InMemoryUserStore, RentalRepository};
use rental_service_lib::service::{RentalManager, RentalService};

const ADULT_ID: i32 = 1;
const MINOR_ID: i32 = 2;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn create_test_user(id: i32, birth_date: NaiveDate) -> User {
    User {
        id,
        first_name: "Josefino".to_string(),
        last_name: "Silva".to_string(),
        email: format!("user{}@teste.com", id),
        cpf: format!("{:010}", id),
        birth_date,
    }
}

fn users() -> Arc<InMemoryUserStore> {
    Arc::new(InMemoryUserStore::new(vec![
        create_test_user(ADULT_ID, NaiveDate::from_ymd_opt(2000, 11, 4).unwrap()),
        create_test_user(MINOR_ID, NaiveDate::from_ymd_opt(2006, 11, 4).unwrap()),
    ]))
}

fn setup_with(rentals: Arc<InMemoryRentalStore>) -> RentalManager {
    RentalManager::with_clock(rentals, users(), Arc::new(FixedClock::new(now())))
}

fn setup() -> (RentalManager, Arc<InMemoryRentalStore>) {
    let rentals = Arc::new(InMemoryRentalStore::new());
    (setup_with(rentals.clone()), rentals)
}

#[tokio::test]
async fn test_full_lifecycle() {
    let (service, _) = setup();

    let first = service
        .create_rental(CreateRental::new(ADULT_ID))
        .await
        .unwrap();
    assert!(!first.closed);
    assert_eq!(first.date, now());

    // One open rental per user
    let err = service
        .create_rental(CreateRental::new(ADULT_ID))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PendentRental));

    let finished = service.finish_rental(first.id).await.unwrap();
    assert!(finished.closed);
    assert_eq!(finished.end_date, Some(now()));

    // Eligible again once the previous rental is closed
    let second = service
        .create_rental(CreateRental::new(ADULT_ID))
        .await
        .unwrap();
    assert_ne!(second.id, first.id);

    let history = service.list_user_rentals(ADULT_ID).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(
        service.get_open_rental(ADULT_ID).await.unwrap().map(|r| r.id),
        Some(second.id)
    );
}

#[tokio::test]
async fn test_minor_cannot_rent() {
    let (service, rentals) = setup();

    let err = service
        .create_rental(CreateRental::new(MINOR_ID))
        .await
        .unwrap_err();

    assert_eq!(err.name(), "InsufficientAgeError");
    assert!(rentals.find_by_user_id(MINOR_ID).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_user_cannot_rent() {
    let (service, rentals) = setup();

    let err = service
        .create_rental(CreateRental::new(404))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "User not found.");
    assert!(rentals.find_by_user_id(404).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_age_is_checked_before_open_rentals() {
    // A minor with a leftover open rental gets the age rejection
    let leftover = Rental {
        id: 10,
        date: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        end_date: None,
        user_id: MINOR_ID,
        closed: false,
    };
    let service = setup_with(Arc::new(InMemoryRentalStore::with_rentals(vec![leftover])));

    let err = service
        .create_rental(CreateRental::new(MINOR_ID))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InsufficientAge));
}

#[tokio::test]
async fn test_finish_twice_is_rejected() {
    let (service, rentals) = setup();
    let rental = service
        .create_rental(CreateRental::new(ADULT_ID))
        .await
        .unwrap();
    service.finish_rental(rental.id).await.unwrap();

    let err = service.finish_rental(rental.id).await.unwrap_err();

    assert_eq!(err.name(), "RentalClosedError");
    let stored = rentals.find_by_id(rental.id).await.unwrap().unwrap();
    assert!(stored.closed);
    assert_eq!(stored.end_date, Some(now()));
}

#[tokio::test]
async fn test_finish_unknown_rental() {
    let (service, _) = setup();

    let err = service.finish_rental(1234).await.unwrap_err();

    assert_eq!(err.name(), "NotFoundError");
    assert_eq!(err.to_string(), "Rental not found.");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_open_one_rental() {
    let (service, rentals) = setup();
    let service = Arc::new(service);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.create_rental(CreateRental::new(ADULT_ID)).await })
        })
        .collect();

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let created = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, AppError::PendentRental)));

    let open: Vec<_> = rentals
        .find_by_user_id(ADULT_ID)
        .await
        .unwrap()
        .into_iter()
        .filter(|r| !r.closed)
        .collect();
    assert_eq!(open.len(), 1);
}

#[tokio::test]
async fn test_missing_negative_user_id_is_not_found() {
    let (service, _) = setup();

    let err = service
        .create_rental(CreateRental::new(-5))
        .await
        .unwrap_err();

    assert_eq!(err.name(), "NotFoundError");
    assert_eq!(err.to_string(), "User not found.");
}

#[tokio::test]
async fn test_stored_user_with_id_zero_can_rent() {
    let users = users();
    users
        .insert(create_test_user(0, NaiveDate::from_ymd_opt(1990, 3, 10).unwrap()))
        .unwrap();
    let service = RentalManager::with_clock(
        Arc::new(InMemoryRentalStore::new()),
        users,
        Arc::new(FixedClock::new(now())),
    );

    assert_eq!(service.get_user_for_rental(0).await.unwrap().id, 0);
    let rental = service.create_rental(CreateRental::new(0)).await.unwrap();

    assert_eq!(rental.user_id, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_finishes_close_once() {
    let (service, rentals) = setup();
    let rental = service
        .create_rental(CreateRental::new(ADULT_ID))
        .await
        .unwrap();
    let rental_id = rental.id;
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.finish_rental(rental_id).await })
        })
        .collect();

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, AppError::RentalClosed)));

    let stored = rentals.find_by_id(rental_id).await.unwrap().unwrap();
    assert!(stored.closed);
    assert_eq!(stored.end_date, Some(now()));
}

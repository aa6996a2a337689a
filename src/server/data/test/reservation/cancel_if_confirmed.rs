use super::*;

/// Tests that a reservation can only be cancelled once.
///
/// Expected: first cancel succeeds, second affects no rows
#[tokio::test]
async fn cancels_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
    let reservation = factory::reservation::create_reservation(db, vehicle.id, user.id).await?;
    let repo = ReservationRepository::new(db);

    assert!(repo.cancel_if_confirmed(reservation.id).await?);
    assert!(!repo.cancel_if_confirmed(reservation.id).await?);

    let stored = repo.find_by_id(reservation.id).await?.unwrap();
    assert_eq!(stored.status, ReservationStatus::Cancelled);
    assert_eq!(repo.count_confirmed_for_vehicle(vehicle.id).await?, 0);

    Ok(())
}

use super::*;

/// Tests removing all reservations of a vehicle.
///
/// Expected: reservations and their amenity rows for that vehicle are gone
#[tokio::test]
async fn removes_reservations_and_amenities() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
    let keep = factory::create_vehicle(db).await?;
    factory::reservation::create_reservation(db, vehicle.id, user.id).await?;
    factory::reservation::create_reservation(db, vehicle.id, user.id).await?;
    factory::reservation::create_reservation(db, keep.id, user.id).await?;

    let repo = ReservationRepository::new(db);
    assert_eq!(repo.delete_by_vehicle(vehicle.id).await?, 2);

    assert!(repo.get_by_vehicle(vehicle.id).await?.is_empty());
    assert_eq!(repo.get_by_vehicle(keep.id).await?.len(), 1);
    assert_eq!(
        entity::prelude::ReservationAmenity::find().count(db).await?,
        1
    );

    Ok(())
}

use super::*;

/// Tests that a reservation is stored with one amenity row per tag.
///
/// Expected: Ok with Confirmed reservation carrying both amenities
#[tokio::test]
async fn stores_reservation_with_amenities() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
    let repo = ReservationRepository::new(db);

    let created = repo
        .create(&params(vehicle.id, user.id, &["gps", "power-bank"]))
        .await?;

    assert_eq!(created.status, ReservationStatus::Confirmed);
    assert_eq!(created.days(), 4);
    assert_eq!(
        created.amenities.amenities(),
        &[Amenity::Gps, Amenity::PowerBank]
    );

    let amenity_rows = entity::prelude::ReservationAmenity::find().count(db).await?;
    assert_eq!(amenity_rows, 2);

    let loaded = repo.find_by_id(created.id).await?.unwrap();
    assert_eq!(loaded.amenities, created.amenities);

    Ok(())
}

/// Tests listing reservations for a single customer.
///
/// Expected: only that customer's reservations are returned
#[tokio::test]
async fn lists_by_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
    let other = factory::create_user(db).await?;
    factory::reservation::create_reservation(db, vehicle.id, user.id).await?;
    factory::reservation::create_reservation(db, vehicle.id, user.id).await?;
    factory::reservation::create_reservation(db, vehicle.id, other.id).await?;

    let repo = ReservationRepository::new(db);
    let mine = repo.get_by_user(user.id).await?;

    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r.user_id == user.id));
    assert_eq!(repo.get_all().await?.len(), 3);

    Ok(())
}

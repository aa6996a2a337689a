use super::*;

/// Tests creating a vehicle from a draft.
///
/// Verifies that new vehicles start as Available and keep their images in slot order.
///
/// Expected: Ok with Available vehicle and image in the second slot
#[tokio::test]
async fn creates_available_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VehicleRepository::new(db);
    let mut images = VehicleImages::default();
    images.set(1, "aGVsbG8=".to_string());

    let vehicle = repo.create(draft("ZZ 100"), images).await?;

    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert_eq!(vehicle.license_plate, "ZZ 100");
    assert_eq!(vehicle.images.0[0], None);
    assert_eq!(vehicle.images.0[1].as_deref(), Some("aGVsbG8="));
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests that license plates are unique.
///
/// Expected: Err on second insert with the same plate
#[tokio::test]
async fn rejects_duplicate_license_plate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VehicleRepository::new(db);
    repo.create(draft("ZZ 101"), VehicleImages::default())
        .await?;

    assert!(repo.license_plate_taken("ZZ 101", None).await?);
    let result = repo.create(draft("ZZ 101"), VehicleImages::default()).await;
    assert!(result.is_err());

    Ok(())
}

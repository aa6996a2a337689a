use super::*;

/// Tests that a details update keeps status and images.
///
/// Expected: descriptive fields replaced, status Rented preserved
#[tokio::test]
async fn preserves_status_and_images() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VehicleRepository::new(db);
    let mut images = VehicleImages::default();
    images.set(0, "aW1n".to_string());
    let vehicle = repo.create(draft("ZZ 200"), images).await?;
    repo.set_status(vehicle.id, VehicleStatus::Rented).await?;

    let mut update = draft("ZZ 201");
    update.color = "Black".to_string();
    let updated = repo.update_details(vehicle.id, update).await?.unwrap();

    assert_eq!(updated.color, "Black");
    assert_eq!(updated.license_plate, "ZZ 201");
    assert_eq!(updated.status, VehicleStatus::Rented);
    assert_eq!(updated.images.0[0].as_deref(), Some("aW1n"));

    Ok(())
}

/// Tests updating a vehicle that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_vehicle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VehicleRepository::new(db);
    assert!(repo.update_details(404, draft("ZZ 202")).await?.is_none());

    Ok(())
}

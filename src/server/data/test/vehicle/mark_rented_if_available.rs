use super::*;

/// Tests the conditional Available to Rented flip.
///
/// Expected: first call flips the vehicle, second call affects no rows
#[tokio::test]
async fn flips_only_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let vehicle = factory::create_vehicle(db).await?;
    let repo = VehicleRepository::new(db);

    assert!(repo.mark_rented_if_available(vehicle.id).await?);
    assert!(!repo.mark_rented_if_available(vehicle.id).await?);

    let stored = repo.find_by_id(vehicle.id).await?.unwrap();
    assert_eq!(stored.status, VehicleStatus::Rented);

    Ok(())
}

/// Tests that vehicles in maintenance cannot be rented.
///
/// Expected: Ok(false) and status unchanged
#[tokio::test]
async fn leaves_unavailable_vehicle_untouched() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vehicle_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let vehicle = factory::vehicle::VehicleFactory::new(db)
        .status(VehicleStatus::Maintenance)
        .build()
        .await?;
    let repo = VehicleRepository::new(db);

    assert!(!repo.mark_rented_if_available(vehicle.id).await?);
    assert!(!repo.mark_rented_if_available(vehicle.id + 100).await?);

    let stored = repo.find_by_id(vehicle.id).await?.unwrap();
    assert_eq!(stored.status, VehicleStatus::Maintenance);

    Ok(())
}

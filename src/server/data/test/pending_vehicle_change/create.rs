use super::*;

/// Tests staging a removal.
///
/// Expected: PENDING REMOVE row with vehicle id and no payload
#[tokio::test]
async fn stages_removal() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let vehicle = factory::create_vehicle(db).await?;

    let repo = PendingVehicleChangeRepository::new(db);
    let pending = repo
        .create(
            &VehicleChange::Remove {
                vehicle_id: vehicle.id,
            },
            admin.id,
        )
        .await?;

    assert_eq!(pending.change_type, ChangeType::Remove);
    assert_eq!(pending.status, ApprovalStatus::Pending);
    assert_eq!(pending.vehicle_id, Some(vehicle.id));
    assert_eq!(pending.vehicle_data, None);
    assert_eq!(pending.requested_by, admin.id);

    Ok(())
}

/// Tests that a stored ADD payload parses back into a draft.
///
/// Expected: Add change whose draft carries the factory values
#[tokio::test]
async fn stored_add_payload_parses() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let staged = factory::pending_vehicle_change::PendingVehicleChangeFactory::new(db, admin.id)
        .build()
        .await?;

    let repo = PendingVehicleChangeRepository::new(db);
    let pending = repo.find_by_id(staged.id).await?.unwrap();

    match pending.change()? {
        VehicleChange::Add(draft) => {
            assert_eq!(draft.make, "Honda");
            assert_eq!(draft.location, "Airport");
        }
        other => panic!("expected Add, got {:?}", other),
    }

    Ok(())
}

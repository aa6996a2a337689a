use super::*;

/// Tests that resolved maintenance requests drop out of the queue.
///
/// Expected: only the PENDING request is listed
#[tokio::test]
async fn lists_only_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let vehicle = factory::create_vehicle(db).await?;
    let pending = factory::maintenance::create_pending_maintenance(
        db,
        vehicle.id,
        admin.id,
        ApprovalStatus::Pending,
    )
    .await?;
    factory::maintenance::create_pending_maintenance(
        db,
        vehicle.id,
        admin.id,
        ApprovalStatus::Approved,
    )
    .await?;

    let repo = PendingMaintenanceRepository::new(db);
    let queue = repo.get_pending().await?;

    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, pending.id);
    assert_eq!(queue[0].draft.maintenance_type, "Repair");

    Ok(())
}

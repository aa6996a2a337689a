use super::*;

/// Tests that a rejection records reviewer and reason once.
///
/// Expected: first resolve writes the review, second returns false
#[tokio::test]
async fn records_review_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let reviewer = factory::create_super_admin(db).await?;
    let staged = factory::pending_vehicle_change::PendingVehicleChangeFactory::new(db, admin.id)
        .build()
        .await?;

    let repo = PendingVehicleChangeRepository::new(db);
    assert!(repo
        .resolve_if_pending(
            staged.id,
            ApprovalStatus::Rejected,
            reviewer.id,
            Some("Duplicate listing".to_string()),
        )
        .await?);
    assert!(!repo
        .resolve_if_pending(staged.id, ApprovalStatus::Approved, reviewer.id, None)
        .await?);

    let stored = repo.find_by_id(staged.id).await?.unwrap();
    assert_eq!(stored.status, ApprovalStatus::Rejected);
    assert_eq!(stored.review.approved_by, Some(reviewer.id));
    assert_eq!(
        stored.review.rejection_reason.as_deref(),
        Some("Duplicate listing")
    );
    assert!(repo.get_pending().await?.is_empty());

    Ok(())
}

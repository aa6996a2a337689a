use super::*;

/// Tests that a request resolves exactly once.
///
/// Expected: first resolve succeeds and stamps approved_at, second is a no-op
#[tokio::test]
async fn resolves_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RegistrationRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let request = factory::registration_request::create_registration_request(db).await?;
    let repo = RegistrationRequestRepository::new(db);

    assert!(repo
        .resolve_if_pending(request.id, ApprovalStatus::Approved)
        .await?);
    assert!(!repo
        .resolve_if_pending(request.id, ApprovalStatus::Rejected)
        .await?);

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert_eq!(stored.status, ApprovalStatus::Approved);
    assert!(stored.approved_at.is_some());
    assert!(repo.get_pending().await?.is_empty());

    Ok(())
}

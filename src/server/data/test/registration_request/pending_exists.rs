use super::*;

/// Tests duplicate detection against pending requests only.
///
/// Verifies that a rejected request no longer blocks the same email or license.
///
/// Expected: true for the pending request, false for the rejected one
#[tokio::test]
async fn only_pending_requests_count() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RegistrationRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::registration_request::RegistrationRequestFactory::new(db)
        .email("pending@gmail.com")
        .drivers_license_number("7000001")
        .build()
        .await?;
    factory::registration_request::RegistrationRequestFactory::new(db)
        .email("rejected@gmail.com")
        .drivers_license_number("7000002")
        .status(ApprovalStatus::Rejected)
        .build()
        .await?;

    let repo = RegistrationRequestRepository::new(db);

    assert!(repo.pending_email_exists("pending@gmail.com").await?);
    assert!(repo.pending_license_exists("7000001").await?);
    assert!(!repo.pending_email_exists("rejected@gmail.com").await?);
    assert!(!repo.pending_license_exists("7000002").await?);

    Ok(())
}

/// Tests that created requests start as PENDING and are listed.
///
/// Expected: one pending request with the stored license
#[tokio::test]
async fn create_starts_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::RegistrationRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RegistrationRequestRepository::new(db);
    let created = repo
        .create(NewRegistrationRequest {
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            phone_number: "5550001".to_string(),
            email: "ana@gmail.com".to_string(),
            password_hash: "hash".to_string(),
            drivers_license_number: "7654321".to_string(),
            drivers_license_image: None,
        })
        .await?;

    assert_eq!(created.status, ApprovalStatus::Pending);
    let pending = repo.get_pending().await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].drivers_license_number, "7654321");

    Ok(())
}

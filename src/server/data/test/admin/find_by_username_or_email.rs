use super::*;

/// Tests that either identifier resolves the same admin.
///
/// Expected: Some(admin) for username and email, None otherwise
#[tokio::test]
async fn matches_username_or_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Admin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::admin::AdminFactory::new(db)
        .username("fleetboss")
        .email("boss@gmail.com")
        .build()
        .await?;

    let repo = AdminRepository::new(db);

    let by_username = repo.find_by_username_or_email("fleetboss").await?.unwrap();
    let by_email = repo.find_by_username_or_email("boss@gmail.com").await?.unwrap();
    assert_eq!(by_username.id, admin.id);
    assert_eq!(by_email.id, admin.id);
    assert!(repo.find_by_username_or_email("nobody").await?.is_none());

    Ok(())
}

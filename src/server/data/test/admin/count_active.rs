use super::*;

/// Tests that only ACTIVE admins are counted.
///
/// Expected: 2 active out of 3 admins
#[tokio::test]
async fn counts_only_active_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Admin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_super_admin(db).await?;
    let admin = factory::create_admin(db).await?;
    factory::admin::AdminFactory::new(db)
        .status(AdminStatus::Inactive)
        .build()
        .await?;

    let repo = AdminRepository::new(db);
    assert_eq!(repo.count_active().await?, 2);

    repo.set_status(admin.id, AdminStatus::Inactive).await?;
    assert_eq!(repo.count_active().await?, 1);

    Ok(())
}

/// Tests the first-admin check.
///
/// Expected: false on empty table, true after an insert
#[tokio::test]
async fn any_exists_tracks_table() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Admin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AdminRepository::new(db);
    assert!(!repo.any_exists().await?);

    repo.create(NewAdmin {
        first_name: "Ronaldo".to_string(),
        last_name: "Owner".to_string(),
        username: "ronaldo".to_string(),
        email: "ronaldo@gmail.com".to_string(),
        password_hash: "hash".to_string(),
        role: AdminRole::SuperAdmin,
    })
    .await?;

    assert!(repo.any_exists().await?);

    Ok(())
}

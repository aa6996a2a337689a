use super::*;

/// Tests a partial profile update.
///
/// Expected: only supplied fields change
#[tokio::test]
async fn updates_only_supplied_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Admin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let repo = AdminRepository::new(db);

    let updated = repo
        .update_profile(
            admin.id,
            UpdateAdminParams {
                first_name: Some("Maria".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.first_name, "Maria");
    assert_eq!(updated.username, admin.username);
    assert_eq!(updated.email, admin.email);
    assert!(updated.updated_at >= admin.updated_at);

    assert!(repo
        .update_profile(admin.id + 99, UpdateAdminParams::default())
        .await?
        .is_none());

    Ok(())
}

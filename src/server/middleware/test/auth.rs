use entity::sea_orm_active_enums::AdminStatus;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::admin::AdminRepository,
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
    },
    model::account::{Account, Principal, Role},
};

/// Tests a request without a login.
///
/// Expected: Err(AuthError::NotAuthenticated)
#[tokio::test]
async fn denies_access_when_not_authenticated() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotAuthenticated))
    ));

    Ok(())
}

/// Tests that a super admin satisfies the plain admin permission.
///
/// Expected: Ok(Account::Admin)
#[tokio::test]
async fn super_admin_passes_admin_check() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::create_super_admin(db).await?;
    AuthSession::new(session)
        .login(Principal {
            id: admin.id,
            role: Role::SuperAdmin,
        })
        .await?;

    let account = AuthGuard::new(db, session)
        .require(&[Permission::Admin, Permission::SuperAdmin])
        .await?;

    assert!(matches!(account, Account::Admin(a) if a.id == admin.id));

    Ok(())
}

/// Tests a regular admin calling a super-admin endpoint.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_super_admin_endpoint_to_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::create_admin(db).await?;
    AuthSession::new(session)
        .login(Principal {
            id: admin.id,
            role: Role::Admin,
        })
        .await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::SuperAdmin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == admin.id
    ));

    Ok(())
}

/// Tests that customers cannot reach admin endpoints.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_admin_endpoint_to_customer() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session)
        .login(Principal {
            id: user.id,
            role: Role::Customer,
        })
        .await?;

    let guard = AuthGuard::new(db, session);
    assert!(guard.require(&[Permission::Customer]).await.is_ok());
    assert!(matches!(
        guard.require(&[Permission::Admin]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));

    Ok(())
}

/// Tests an admin deactivated after logging in.
///
/// Expected: Err(AuthError::AccountNotFound)
#[tokio::test]
async fn denies_access_after_deactivation() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::create_admin(db).await?;
    AuthSession::new(session)
        .login(Principal {
            id: admin.id,
            role: Role::Admin,
        })
        .await?;

    AdminRepository::new(db)
        .set_status(admin.id, AdminStatus::Inactive)
        .await?;

    let result = AuthGuard::new(db, session).require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountNotFound(id))) if id == admin.id
    ));

    Ok(())
}

/// Tests a customer whose account was deleted while logged in.
///
/// Expected: Err(AuthError::AccountNotFound)
#[tokio::test]
async fn denies_access_when_account_deleted() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session)
        .login(Principal {
            id: 999,
            role: Role::Customer,
        })
        .await?;

    let result = AuthGuard::new(db, session).require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountNotFound(999)))
    ));

    Ok(())
}

/// Tests that logout clears the principal.
///
/// Expected: Err(AuthError::NotAuthenticated) after logout
#[tokio::test]
async fn logout_clears_principal() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    let auth_session = AuthSession::new(session);
    auth_session
        .login(Principal {
            id: user.id,
            role: Role::Customer,
        })
        .await?;
    auth_session.logout().await?;

    assert!(auth_session.principal().await?.is_none());
    assert!(matches!(
        AuthGuard::new(db, session).require(&[]).await,
        Err(AppError::AuthErr(AuthError::NotAuthenticated))
    ));

    Ok(())
}

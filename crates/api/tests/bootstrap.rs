use babylist_api::auth::accounts;
use babylist_api::bootstrap::ensure_admin;
use babylist_api::config::AdminBootstrap;
use babylist_core::roles::{ROLE_ADMIN, ROLE_GUEST};
use babylist_db::repositories::UserRepo;
use sqlx::PgPool;

fn admin_config() -> AdminBootstrap {
    AdminBootstrap {
        name: "Admin".into(),
        email: "admin@example.com".into(),
        password: "bootstrap-pw".into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creates_admin_on_empty_database(pool: PgPool) {
    ensure_admin(&pool, &admin_config()).await.unwrap();

    let user = UserRepo::find_by_email(&pool, "admin@example.com")
        .await
        .unwrap()
        .expect("admin should exist");
    assert_eq!(user.role, ROLE_ADMIN);
    assert!(accounts::login(&pool, "admin@example.com", "bootstrap-pw")
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn promotes_existing_account_without_touching_password(pool: PgPool) {
    let existing = accounts::register(&pool, "Owner", "admin@example.com", "own-pw", ROLE_GUEST)
        .await
        .unwrap();

    ensure_admin(&pool, &admin_config()).await.unwrap();
    ensure_admin(&pool, &admin_config()).await.unwrap();

    let user = UserRepo::find_by_id(&pool, existing.id).await.unwrap().unwrap();
    assert_eq!(user.role, ROLE_ADMIN);
    assert_eq!(user.password_hash, existing.password_hash);
    assert_eq!(UserRepo::list(&pool).await.unwrap().len(), 1);
}

//! Startup bootstrap: make sure an admin account exists.

use babylist_core::roles::ROLE_ADMIN;
use babylist_db::repositories::UserRepo;
use babylist_db::DbPool;

use crate::auth::accounts;
use crate::config::AdminBootstrap;
use crate::error::AppResult;

/// Ensure the configured admin account exists and holds the admin role.
///
/// An existing account with that email is promoted, never re-passworded.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<()> {
    match UserRepo::find_by_email(pool, &admin.email).await? {
        Some(user) if user.is_admin() => {
            tracing::debug!(user_id = user.id, "Admin account already present");
        }
        Some(user) => {
            UserRepo::promote_to_admin(pool, user.id).await?;
            tracing::info!(user_id = user.id, "Promoted existing account to admin");
        }
        None => {
            let user =
                accounts::register(pool, &admin.name, &admin.email, &admin.password, ROLE_ADMIN)
                    .await?;
            tracing::info!(user_id = user.id, "Created admin account");
        }
    }
    Ok(())
}

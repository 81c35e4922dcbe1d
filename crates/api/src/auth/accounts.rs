//! Account registration and login.
//!
//! Both operations compose the user repository with password hashing, which
//! is why they live here rather than in the db crate.

use babylist_core::session_token::generate_session_token;
use babylist_core::types::DbId;
use babylist_db::models::user::{CreateUser, User};
use babylist_db::repositories::UserRepo;
use babylist_db::DbPool;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// Fresh tokens to try before giving up on a login.
const MAX_TOKEN_ATTEMPTS: usize = 5;

/// Hash `password` and insert a new user with the given role.
pub async fn register(
    pool: &DbPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> AppResult<User> {
    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        role: role.to_string(),
    };
    let user = UserRepo::create(pool, &input).await?;
    tracing::info!(user_id = user.id, role, "User registered");
    Ok(user)
}

/// Verify credentials and rotate the user's session token.
///
/// Returns `Ok(None)` for an unknown email or a wrong password; no token is
/// issued in either case. On success the returned row carries the new token.
pub async fn login(pool: &DbPool, email: &str, password: &str) -> AppResult<Option<User>> {
    let Some(user) = UserRepo::find_by_email(pool, email).await? else {
        tracing::debug!("Login attempt for unknown email");
        return Ok(None);
    };

    let valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::debug!(user_id = user.id, "Login attempt with wrong password");
        return Ok(None);
    }

    let previous = user.token.as_deref();
    let updated =
        issue_token(pool, user.id, || generate_session_token(password, previous)).await?;
    if updated.is_some() {
        tracing::info!(user_id = user.id, "User logged in");
    }
    Ok(updated)
}

/// Persist a token from `next_token`, drawing again while it collides with
/// another user's stored token.
async fn issue_token(
    pool: &DbPool,
    user_id: DbId,
    mut next_token: impl FnMut() -> String,
) -> AppResult<Option<User>> {
    for attempt in 1..=MAX_TOKEN_ATTEMPTS {
        match UserRepo::set_token(pool, user_id, &next_token()).await {
            Ok(updated) => return Ok(updated),
            Err(e) if violates(&e, "uq_users_token") => {
                tracing::warn!(user_id, attempt, "Session token collided, drawing another");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(AppError::InternalError(format!(
        "No unique session token after {MAX_TOKEN_ATTEMPTS} attempts"
    )))
}

fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}

/// Replace a plaintext password with its hash, if one was supplied.
pub fn hash_optional_password(password: Option<&str>) -> AppResult<Option<String>> {
    password
        .map(|p| {
            hash_password(p)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
        })
        .transpose()
}

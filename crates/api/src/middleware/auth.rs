//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use babylist_core::roles::ROLE_ADMIN;
use babylist_core::session_token::is_plausible_token;
use babylist_core::types::DbId;
use babylist_db::repositories::UserRepo;

use crate::error::{unauthorized, AppError};
use crate::state::AppState;

/// The user behind the `Authorization: Bearer <token>` header.
///
/// The token is looked up verbatim in `users.token`. Any handler that takes
/// an `AuthUser` parameter is a protected route:
///
/// ```ignore
/// async fn reserve(user: AuthUser, AppPath(id): AppPath<DbId>) -> AppResult<...> {
///     tracing::info!(user_id = user.user_id, "reserving");
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let user = UserRepo::find_by_token(&state.pool, token)
            .await?
            .ok_or_else(|| unauthorized("Token provided not valid"))?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}

/// Pull a plausible bearer token out of the headers.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?
        .trim();

    if !is_plausible_token(token) {
        return Err(unauthorized("No token provided"));
    }
    Ok(token)
}

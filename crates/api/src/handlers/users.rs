//! Handlers for the `/users` resource: signup, login, token lookup, and
//! admin user management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use babylist_core::error::CoreError;
use babylist_core::roles::ROLE_GUEST;
use babylist_core::types::DbId;
use babylist_core::validation::{require_fields, validate_age, validate_email};
use babylist_db::models::user::{SessionUser, UpdateUser, User, UserResponse};
use babylist_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::accounts;
use crate::error::{not_found, unauthorized, validation, AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
///
/// Fields are optional at the type level so that a missing field is reported
/// as a validation error naming it, not as a JSON decoding failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Checked against the accepted range but not stored.
    pub age: Option<i32>,
}

/// Request body for `PUT /users` (login).
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let data = users.iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::list(data)))
}

/// POST /api/users
///
/// Public signup. New accounts are always guests.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    require_fields(&[
        ("name", input.name.as_deref()),
        ("email", input.email.as_deref()),
        ("password", input.password.as_deref()),
    ])
    .map_err(validation)?;

    let name = input.name.unwrap_or_default();
    let email = input.email.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    validate_email(&email).map_err(validation)?;
    if let Some(age) = input.age {
        validate_age(age).map_err(validation)?;
    }

    let user = accounts::register(&state.pool, name.trim(), &email, &password, ROLE_GUEST).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(&user)).with_message("User created successfully")),
    ))
}

/// PUT /api/users
///
/// Log in with email + password. Issues a new bearer token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<SessionUser>>> {
    let user = accounts::login(&state.pool, &input.email, &input.password)
        .await?
        .ok_or_else(|| unauthorized("Invalid email or password"))?;

    let session = session_user(&user)?;
    Ok(Json(ApiResponse::ok(session).with_message("User login successfully")))
}

/// GET /api/users/me
///
/// Resolve the bearer token to its user.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = find_user(&state, auth.user_id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = find_user(&state, id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// PUT /api/users/{id}
///
/// Admins may edit anyone; other users only themselves.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    if !auth.is_admin() && auth.user_id != id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only edit your own profile".into(),
        )));
    }

    if let Some(email) = input.email.as_deref() {
        validate_email(email).map_err(validation)?;
    }
    if let Some(age) = input.age {
        validate_age(age).map_err(validation)?;
    }
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(validation("Name must not be empty"));
    }
    if input.password.as_deref().is_some_and(str::is_empty) {
        return Err(validation("Password must not be empty"));
    }

    let update = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        email: input.email,
        password_hash: accounts::hash_optional_password(input.password.as_deref())?,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    Ok(Json(
        ApiResponse::ok(UserResponse::from(&user)).with_message("User updated successfully"),
    ))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(not_found("User", id));
    }
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))
}

/// Build the login payload. A logged-in row always carries a token.
fn session_user(user: &User) -> AppResult<SessionUser> {
    let token = user
        .token
        .clone()
        .ok_or_else(|| AppError::InternalError("Login produced no token".into()))?;
    Ok(SessionUser {
        user: UserResponse::from(user),
        token,
    })
}

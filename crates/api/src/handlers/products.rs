//! Handlers for the `/products` resource: catalog browsing, admin catalog
//! management, and reservations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use babylist_core::error::CoreError;
use babylist_core::types::DbId;
use babylist_core::validation::require_fields;
use babylist_db::models::product::{CreateProduct, Product, ReserveOutcome, UpdateProduct};
use babylist_db::repositories::ProductRepo;
use serde::Deserialize;

use crate::error::{not_found, validation, AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Product fields as submitted by the admin form.
#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

/// Request body for `POST /products`: `{ "product": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product: NewProduct,
}

/// Request body for `PUT /products/{id}`: `{ "product": { ...partial } }`.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub product: UpdateProduct,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/products
///
/// Active products only; what guests see.
pub async fn list_active(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let products = ProductRepo::list_active(&state.pool).await?;
    Ok(Json(ApiResponse::list(products)))
}

/// GET /api/products/all
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let products = ProductRepo::list_all(&state.pool).await?;
    Ok(Json(ApiResponse::list(products)))
}

/// POST /api/products
///
/// `url` and `image_url` default to empty, `active` to true.
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let form = input.product;
    require_fields(&[("name", form.name.as_deref())]).map_err(validation)?;

    let create = CreateProduct {
        name: form.name.unwrap_or_default().trim().to_string(),
        description: form.description.unwrap_or_default(),
        url: form.url.unwrap_or_default(),
        image_url: form.image_url.unwrap_or_default(),
        active: form.active.unwrap_or(true),
    };

    let product = ProductRepo::create(&state.pool, &create).await?;
    tracing::info!(product_id = product.id, admin_id = admin.user_id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(product).with_message("Product created successfully")),
    ))
}

/// PUT /api/products/{id}
///
/// Partial update. `reserved_by` cannot be changed here.
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let mut update = input.product;
    if let Some(name) = update.name.as_mut() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(validation("Name must not be empty"));
        }
        *name = trimmed.to_string();
    }

    let product = ProductRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found("Product", id))?;

    Ok(Json(
        ApiResponse::ok(product).with_message("Product updated successfully"),
    ))
}

/// POST /api/products/{id}/reserve
///
/// Reserve for the authenticated user. First writer wins; later attempts
/// get a 404 and leave the reservation untouched.
pub async fn reserve_product(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Product>>> {
    match ProductRepo::reserve(&state.pool, id, auth.user_id).await? {
        ReserveOutcome::Reserved(product) => {
            tracing::info!(product_id = id, user_id = auth.user_id, "Product reserved");
            Ok(Json(
                ApiResponse::ok(product).with_message("Product reserved successfully"),
            ))
        }
        ReserveOutcome::AlreadyReserved => Err(AppError::Core(CoreError::AlreadyReserved(id))),
        ReserveOutcome::NotFound => Err(not_found("Product", id)),
    }
}

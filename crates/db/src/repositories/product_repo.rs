//! Repository for the `products` table.

use babylist_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, ReserveOutcome, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, url, image_url, active, reserved_by, created_at, updated_at";

/// Provides CRUD and reservation operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new, unreserved product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, description, url, image_url, active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.url)
            .bind(&input.image_url)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find a product by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every product, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// List products visible to guests (`active = true`), newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE active = true
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                url = COALESCE($4, url),
                image_url = COALESCE($5, image_url),
                active = COALESCE($6, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.url)
            .bind(&input.image_url)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    /// Reserve a product for `user_id`.
    ///
    /// The claim is a single conditional `UPDATE ... WHERE reserved_by IS NULL`,
    /// so of two concurrent callers exactly one sees `Reserved`; the other sees
    /// `AlreadyReserved` and the first reservation stands. When the update
    /// touches no row, a follow-up lookup tells a missing product apart from a
    /// taken one.
    pub async fn reserve(
        pool: &PgPool,
        product_id: DbId,
        user_id: DbId,
    ) -> Result<ReserveOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE products SET reserved_by = $2
             WHERE id = $1 AND reserved_by IS NULL
             RETURNING {COLUMNS}"
        );
        let claimed = sqlx::query_as::<_, Product>(&query)
            .bind(product_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        if let Some(product) = claimed {
            return Ok(ReserveOutcome::Reserved(product));
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(pool)
                .await?;

        if exists {
            tracing::debug!(product_id, user_id, "Reservation refused, product already taken");
            Ok(ReserveOutcome::AlreadyReserved)
        } else {
            Ok(ReserveOutcome::NotFound)
        }
    }
}

//! Product entity model, DTOs, and the reservation outcome.

use babylist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A wishlist entry from the `products` table.
///
/// `reserved_by` is `None` while the product is available.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub active: bool,
    pub reserved_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub fn is_available(&self) -> bool {
        self.reserved_by.is_none()
    }
}

/// DTO for creating a new product. New products are never reserved.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub active: bool,
}

/// DTO for a partial product update. `reserved_by` is deliberately absent:
/// reservations only change through [`crate::repositories::ProductRepo::reserve`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

/// Result of a reservation attempt.
#[derive(Debug)]
pub enum ReserveOutcome {
    /// The product was available and now belongs to the requesting user.
    Reserved(Product),
    /// Somebody reserved it first; the stored row is unchanged.
    AlreadyReserved,
    /// No product with that id.
    NotFound,
}

//! Route definitions for the `/products` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /               -> list_active
/// POST   /               -> create_product
/// GET    /all            -> list_all
/// PUT    /{id}           -> update_product
/// POST   /{id}/reserve   -> reserve_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_active).post(products::create_product))
        .route("/all", get(products::list_all))
        .route("/{id}", put(products::update_product))
        .route("/{id}/reserve", post(products::reserve_product))
}

pub mod health;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /products                         list active (public), create (admin)
/// /products/all                     list all (admin)
/// /products/{id}                    partial update (admin)
/// /products/{id}/reserve            reserve for caller (bearer token)
///
/// /users                            list (admin), signup (public), login (PUT, public)
/// /users/me                         token lookup (bearer token)
/// /users/{id}                       get, delete (admin); update (admin or self)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/users", users::router())
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone. The database is the only shared mutable resource; request
/// handling keeps no in-process state between calls.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: babylist_db::DbPool,
}

use crate::types::DbId;

/// Domain-level failures, independent of transport.
///
/// The API crate maps each variant to an HTTP status; the client crate never
/// sees these directly, only their rendered messages.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The product exists but somebody else claimed it first.
    #[error("Product {0} is already reserved")]
    AlreadyReserved(DbId),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing, malformed, or unknown credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials, insufficient role.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

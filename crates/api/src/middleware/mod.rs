//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- The principal behind a bearer session token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.

pub mod auth;
pub mod rbac;

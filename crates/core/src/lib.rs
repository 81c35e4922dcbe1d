//! Domain primitives shared by the database, API, and client crates.
//!
//! Nothing in here performs I/O.

pub mod error;
pub mod roles;
pub mod session_token;
pub mod types;
pub mod validation;

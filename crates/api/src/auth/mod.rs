//! Credential handling.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`accounts`] -- Account registration and login (token issuance).

pub mod accounts;
pub mod password;

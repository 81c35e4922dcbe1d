//! Well-known role name constants.
//!
//! These must match the `users.role` check constraint in
//! `20251001000002_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_GUEST: &str = "guest";

//! Client side of the gift registry: a typed HTTP client for every API
//! endpoint and the persisted login session it authenticates with.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use client::RegistryClient;
pub use error::ClientError;
pub use session::{Session, SessionStore};

//! Wire types as the API sends and accepts them.

use babylist_core::roles::ROLE_ADMIN;
use babylist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A user as returned by the API. Never carries secrets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// The logged-in user kept in the persisted session.
///
/// Built from the login response, which is the user plus its fresh token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

/// Signup payload for `POST /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

/// Partial profile edit for `PUT /api/users/{id}`. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

/// Product fields for create and partial update. Sent wrapped as
/// `{ "product": { ... } }`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// The response envelope shared by every endpoint, success or failure.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}

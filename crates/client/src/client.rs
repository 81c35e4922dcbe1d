//! HTTP client for the registry API.
//!
//! One method per endpoint. Methods that need a bearer token take the
//! caller's [`Session`] and return `Ok(None)` when nobody is logged in,
//! without touching the network.

use babylist_core::types::DbId;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ClientError;
use crate::models::{Envelope, NewUser, Product, ProductInput, SessionUser, User, UserUpdate};
use crate::session::Session;

/// Typed client for a single registry server.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// * `base_url` - Server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- public endpoints ----

    /// `PUT /api/users`: exchange credentials for a token-bearing user.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        let request = self
            .request(Method::PUT, "/api/users")
            .json(&json!({ "email": email, "password": password }));
        Self::data(request).await
    }

    /// `POST /api/users`: public signup.
    pub async fn signup(&self, user: &NewUser) -> Result<User, ClientError> {
        let request = self.request(Method::POST, "/api/users").json(user);
        Self::data(request).await
    }

    /// `GET /api/products`: the active catalog.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ClientError> {
        Self::data(self.request(Method::GET, "/api/products")).await
    }

    // ---- authenticated endpoints ----

    /// `GET /api/users/me`: resolve the session token to its user.
    pub async fn current_user(&self, session: &Session) -> Result<Option<User>, ClientError> {
        self.authed_data(session, Method::GET, "/api/users/me", None)
            .await
    }

    /// `GET /api/products/all` (admin).
    pub async fn fetch_all_products(
        &self,
        session: &Session,
    ) -> Result<Option<Vec<Product>>, ClientError> {
        self.authed_data(session, Method::GET, "/api/products/all", None)
            .await
    }

    /// `POST /api/products` (admin).
    pub async fn create_product(
        &self,
        session: &Session,
        product: &ProductInput,
    ) -> Result<Option<Product>, ClientError> {
        let body = json!({ "product": product });
        self.authed_data(session, Method::POST, "/api/products", Some(body))
            .await
    }

    /// `PUT /api/products/{id}` (admin). Only the set fields change.
    pub async fn update_product(
        &self,
        session: &Session,
        id: DbId,
        product: &ProductInput,
    ) -> Result<Option<Product>, ClientError> {
        let body = json!({ "product": product });
        self.authed_data(session, Method::PUT, &format!("/api/products/{id}"), Some(body))
            .await
    }

    /// `POST /api/products/{id}/reserve`: claim a product for the session user.
    pub async fn reserve_product(
        &self,
        session: &Session,
        id: DbId,
    ) -> Result<Option<Product>, ClientError> {
        let path = format!("/api/products/{id}/reserve");
        self.authed_data(session, Method::POST, &path, None).await
    }

    /// `GET /api/users` (admin).
    pub async fn list_users(&self, session: &Session) -> Result<Option<Vec<User>>, ClientError> {
        self.authed_data(session, Method::GET, "/api/users", None)
            .await
    }

    /// `GET /api/users/{id}` (admin).
    pub async fn get_user(&self, session: &Session, id: DbId) -> Result<Option<User>, ClientError> {
        self.authed_data(session, Method::GET, &format!("/api/users/{id}"), None)
            .await
    }

    /// `PUT /api/users/{id}` (admin, or the user themself).
    pub async fn update_user(
        &self,
        session: &Session,
        id: DbId,
        update: &UserUpdate,
    ) -> Result<Option<User>, ClientError> {
        let body = serde_json::to_value(update)?;
        self.authed_data(session, Method::PUT, &format!("/api/users/{id}"), Some(body))
            .await
    }

    /// `DELETE /api/users/{id}` (admin). Returns the server's message.
    pub async fn delete_user(
        &self,
        session: &Session,
        id: DbId,
    ) -> Result<Option<String>, ClientError> {
        let Some(request) = self.authed(session, Method::DELETE, &format!("/api/users/{id}"))
        else {
            return Ok(None);
        };
        let envelope: Envelope<serde_json::Value> = Self::send(request).await?;
        Ok(Some(envelope.message.unwrap_or_default()))
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Build a bearer-authenticated request, or `None` without a token.
    fn authed(&self, session: &Session, method: Method, path: &str) -> Option<RequestBuilder> {
        let Some(token) = session.token() else {
            tracing::debug!(path, "No session token, skipping request");
            return None;
        };
        Some(self.request(method, path).bearer_auth(token))
    }

    async fn authed_data<T: DeserializeOwned>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>, ClientError> {
        let Some(mut request) = self.authed(session, method, path) else {
            return Ok(None);
        };
        if let Some(body) = body {
            request = request.json(&body);
        }
        Self::data(request).await.map(Some)
    }

    async fn data<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        Self::send(request)
            .await?
            .data
            .ok_or_else(|| ClientError::UnexpectedResponse("missing data".into()))
    }

    /// Send the request and decode the envelope. A failure envelope or a
    /// non-2xx status becomes [`ClientError::Api`].
    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope = match serde_json::from_slice::<Envelope<T>>(&bytes) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ClientError::UnexpectedResponse(e.to_string()));
            }
            Err(_) => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: failure_message(&bytes),
                });
            }
        };

        if !status.is_success() || !envelope.success {
            let message = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| status.to_string());
            tracing::debug!(status = status.as_u16(), %message, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(envelope)
    }
}

/// Best-effort text for a failure body that is not an envelope.
fn failure_message(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if text.is_empty() {
        "<empty body>".to_string()
    } else {
        text
    }
}

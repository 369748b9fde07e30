//! REST client for the marketplace service.
//!
//! DESIGN
//! ======
//! Two object-safe traits split the surface so session and screen logic
//! can be exercised against mocks: [`AuthApi`] covers the credential
//! endpoints, [`MarketApi`] the product and user operations. [`HttpApi`]
//! implements both over `reqwest`. Status classification is kept in pure
//! functions for testability.
//!
//! The bearer token travels in the `Authorization` header and is set
//! here; callers only hand over the opaque string.

use std::time::Duration;

use crate::net::types::{AuthSuccess, NewProduct, Product, Role, User, UserStatus};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by marketplace API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service rejected the supplied email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration failed because the email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// The bearer token is missing, expired, or revoked.
    #[error("session is no longer valid")]
    Unauthorized,

    /// The token is valid but lacks the required role.
    #[error("permission denied")]
    Forbidden,

    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with an unexpected status.
    #[error("unexpected response: status {status}")]
    Response { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

// =============================================================================
// TRAIT SEAM
// =============================================================================

/// Credential endpoints of the marketplace service.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an identity and bearer token.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on rejection, otherwise transport errors.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, ApiError>;

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// `EmailTaken` when the email is registered, otherwise as `login`.
    async fn register(&self, email: &str, password: &str) -> Result<AuthSuccess, ApiError>;

    /// Validate a stored token and fetch the identity behind it.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the token is no longer accepted.
    async fn get_profile(&self, token: &str) -> Result<User, ApiError>;
}

/// Product and user operations behind the marketplace screens.
#[async_trait::async_trait]
pub trait MarketApi: Send + Sync {
    /// Fetch the public product catalog.
    ///
    /// # Errors
    ///
    /// Transport errors only; the catalog needs no session.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Create a listing on behalf of the signed-in user.
    ///
    /// # Errors
    ///
    /// `Unauthorized` on a stale token, otherwise transport errors.
    async fn create_product(&self, token: &str, draft: &NewProduct) -> Result<Product, ApiError>;

    /// Fetch the user directory (admin only).
    ///
    /// # Errors
    ///
    /// `Unauthorized` on a stale token, `Forbidden` for non-admins.
    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError>;

    /// Change a user's role (admin only).
    ///
    /// # Errors
    ///
    /// As `list_users`.
    async fn update_user_role(&self, token: &str, id: &str, role: Role) -> Result<(), ApiError>;

    /// Change a user's status (admin only).
    ///
    /// # Errors
    ///
    /// As `list_users`.
    async fn update_user_status(&self, token: &str, id: &str, status: UserStatus) -> Result<(), ApiError>;

    /// Delete a user (admin only).
    ///
    /// # Errors
    ///
    /// As `list_users`.
    async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// `reqwest`-backed implementation of both API traits.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client for the given API root (with or without a
    /// trailing slash).
    ///
    /// # Errors
    ///
    /// Returns `Request` if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, ApiError> {
        let request = self.http.post(self.url("/login")).json(&CredentialsBody { email, password });
        let (status, body) = self.execute(request).await?;
        if !is_success(status) {
            return Err(classify_auth(status, body));
        }
        parse_json(&body)
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthSuccess, ApiError> {
        let request = self.http.post(self.url("/register")).json(&CredentialsBody { email, password });
        let (status, body) = self.execute(request).await?;
        if !is_success(status) {
            return Err(classify_auth(status, body));
        }
        parse_json(&body)
    }

    async fn get_profile(&self, token: &str) -> Result<User, ApiError> {
        let request = self.http.get(self.url("/auth/profile")).bearer_auth(token);
        let (status, body) = self.execute(request).await?;
        if !is_success(status) {
            return Err(classify_bearer(status, body));
        }
        parse_json::<ProfileBody>(&body).map(|profile| profile.user)
    }
}

#[async_trait::async_trait]
impl MarketApi for HttpApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let (status, body) = self.execute(self.http.get(self.url("/products"))).await?;
        if !is_success(status) {
            return Err(classify_bearer(status, body));
        }
        parse_json(&body)
    }

    async fn create_product(&self, token: &str, draft: &NewProduct) -> Result<Product, ApiError> {
        let request = self.http.post(self.url("/products")).bearer_auth(token).json(draft);
        let (status, body) = self.execute(request).await?;
        if !is_success(status) {
            return Err(classify_bearer(status, body));
        }
        parse_json(&body)
    }

    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        let request = self.http.get(self.url("/users")).bearer_auth(token);
        let (status, body) = self.execute(request).await?;
        if !is_success(status) {
            return Err(classify_bearer(status, body));
        }
        parse_json(&body)
    }

    async fn update_user_role(&self, token: &str, id: &str, role: Role) -> Result<(), ApiError> {
        let path = format!("/users/{id}/role");
        let request = self.http.put(self.url(&path)).bearer_auth(token).json(&RoleBody { role });
        let (status, body) = self.execute(request).await?;
        if !is_success(status) {
            return Err(classify_bearer(status, body));
        }
        Ok(())
    }

    async fn update_user_status(&self, token: &str, id: &str, status: UserStatus) -> Result<(), ApiError> {
        let path = format!("/users/{id}/status");
        let request = self.http.put(self.url(&path)).bearer_auth(token).json(&StatusBody { status });
        let (code, body) = self.execute(request).await?;
        if !is_success(code) {
            return Err(classify_bearer(code, body));
        }
        Ok(())
    }

    async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let path = format!("/users/{id}");
        let request = self.http.delete(self.url(&path)).bearer_auth(token);
        let (status, body) = self.execute(request).await?;
        if !is_success(status) {
            return Err(classify_bearer(status, body));
        }
        Ok(())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(serde::Deserialize)]
struct ProfileBody {
    user: User,
}

#[derive(serde::Serialize)]
struct RoleBody {
    role: Role,
}

#[derive(serde::Serialize)]
struct StatusBody {
    status: UserStatus,
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

/// Map a non-success status from the credential endpoints.
fn classify_auth(status: u16, body: String) -> ApiError {
    match status {
        401 => ApiError::InvalidCredentials,
        409 => ApiError::EmailTaken,
        _ => ApiError::Response { status, body },
    }
}

/// Map a non-success status from a bearer-authenticated endpoint. Only
/// 401 means the token itself is bad; 403 is a role problem and must
/// not tear the session down.
fn classify_bearer(status: u16, body: String) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        _ => ApiError::Response { status, body },
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

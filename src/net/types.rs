//! API data types shared by the client and screen state.

use serde::{Deserialize, Serialize};

/// Access level carried by a user account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Account standing. `Locked` accounts cannot sign in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Locked,
}

/// Identity record returned by the auth and user endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Successful login/register payload: the identity plus its bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthSuccess {
    pub user: User,
    pub token: String,
}

/// A marketplace listing. Display-only on this side; timestamps are
/// passed through as the service renders them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, rename = "createdAt")]
    pub created_at: String,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: String,
}

/// Fields the product form submits.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

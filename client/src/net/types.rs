//! Shared wire-protocol DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Only the fields the site reads are modeled. The backend sends more (for
//! example `created_at`), and serde drops those on decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account role. The backend only ever issues these two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Administrative account allowed to edit content and products.
    SuperUser,
    /// Regular customer account.
    Client,
}

/// The authenticated caller as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned numeric identifier.
    pub id: i64,
    /// Login email, unique per backend.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Decides which admin pages the account may open.
    pub role: Role,
    /// Whether the backend still accepts this account.
    pub is_active: bool,
}

impl User {
    /// True for administrative accounts.
    #[must_use]
    pub fn is_super_user(&self) -> bool {
        self.role == Role::SuperUser
    }
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Body of a successful `/auth/login` or `/auth/register` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request accepted by the site's forgot-password relay.
///
/// `email` is whatever JSON value the caller sent, string or not. An absent
/// field stays absent on the way out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
}

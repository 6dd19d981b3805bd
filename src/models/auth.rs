use serde::{Deserialize, Serialize};
use super::string_or_number;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authenticated identity returned by `/auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub const SUPER_ADMIN: &'static str = "SUPER_ADMIN";

    /// Only super admins may add protocol team members
    pub fn is_super_admin(&self) -> bool {
        self.role == Self::SUPER_ADMIN
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::system::users::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl AuthResponse {
    pub fn role(&self) -> Option<Role> {
        self.user.role()
    }
}

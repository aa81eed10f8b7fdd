use contracts::system::auth::{AuthResponse, LoginRequest};
use contracts::system::users::User;

use crate::shared::http;

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<AuthResponse, String> {
    let request = LoginRequest { email, password };
    http::post("/auth/login", &request)
        .await
        .map_err(|e| e.summary())
}

/// Get current user; the token is read from storage by the http client
pub async fn get_current_user() -> Result<User, String> {
    http::get("/auth/me").await
}

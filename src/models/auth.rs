//! Authentication-related models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::USERNAME_RE;

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 50, message = "username must be 3-50 characters"),
        regex(
            path = *USERNAME_RE,
            message = "username can only contain letters, numbers, underscores, and hyphens"
        )
    )]
    pub username: String,
    #[validate(
        email(message = "invalid email format"),
        length(max = 255, message = "email too long")
    )]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
}

/// Login response: a single stateless bearer token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

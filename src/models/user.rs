//! Identity and token models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The user a request acts for, resolved once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
}

/// Claims carried by session cookies and API bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub uid: i32,
    pub name: String,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
}

/// Response body of `POST /api/user/login`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

//! HS256 tokens for browser sessions and API clients.
//!
//! Both token kinds share the signing secret and differ by issuer, so a session
//! cookie value is never accepted as an API bearer token and vice versa.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{AppError, AppResult};
use crate::models::{CurrentUser, TokenClaims};

/// Issuer of session cookie tokens.
pub const SESSION_ISSUER: &str = "board-checker/session";
/// Issuer of API bearer tokens.
pub const API_ISSUER: &str = "board-checker/api";
/// Session lifetime (cookie max-age and token expiry).
pub const SESSION_TTL_SECS: i64 = 12 * 60 * 60;
/// API token lifetime.
pub const API_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Signing keys and cookie policy, shared as app data.
#[derive(Clone)]
pub struct TokenKeys {
    secret: SecretString,
    secure_cookies: bool,
}

impl TokenKeys {
    pub fn new(secret: SecretString, secure_cookies: bool) -> Self {
        Self {
            secret,
            secure_cookies,
        }
    }

    /// Whether cookies carry the `Secure` attribute (production).
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// Sign a token for `user`.
    pub fn issue(&self, user: &CurrentUser, issuer: &str, ttl_secs: i64) -> AppResult<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(ttl_secs);

        let claims = TokenClaims {
            uid: user.id,
            name: user.name.clone(),
            iss: issuer.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::default(), &claims, &key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn issue_session(&self, user: &CurrentUser) -> AppResult<String> {
        self.issue(user, SESSION_ISSUER, SESSION_TTL_SECS)
    }

    pub fn issue_api_token(&self, user: &CurrentUser) -> AppResult<String> {
        self.issue(user, API_ISSUER, API_TOKEN_TTL_SECS)
    }

    /// Verify signature, expiry and issuer.
    pub fn verify(&self, token: &str, issuer: &str) -> Result<TokenClaims, String> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.validate_aud = false;

        let token_data = decode::<TokenClaims>(token, &key, &validation)
            .map_err(|e| format!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenKeys([REDACTED])")
    }
}

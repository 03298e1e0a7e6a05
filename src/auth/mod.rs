//! Authentication: password hashing, signed tokens, session cookies, identity extractors.

mod extractor;
pub mod password;
pub mod session;
pub mod token;

pub use extractor::{ApiUser, AuthSource, Identity, LoggedIn};
pub use token::{API_ISSUER, SESSION_ISSUER, TokenKeys};

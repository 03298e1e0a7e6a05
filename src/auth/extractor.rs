//! Actix-web extractors for the identity resolved by the identity middleware.
//!
//! - [`Identity`]: whoever the request acts for, possibly nobody
//! - [`LoggedIn`]: browser routes; redirects to the login page when anonymous
//! - [`ApiUser`]: API routes; 401 JSON when no valid bearer token was sent

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{Ready, ready};

use crate::error::{ApiError, AppError};
use crate::models::CurrentUser;

/// How the identity was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// `bc_session` cookie, browser routes
    Session,
    /// `Authorization: Bearer` token, API routes
    Bearer,
}

/// Identity attached to a request, anonymous by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity(Option<(CurrentUser, AuthSource)>);

impl Identity {
    pub fn anonymous() -> Self {
        Identity(None)
    }

    pub fn session(user: CurrentUser) -> Self {
        Identity(Some((user, AuthSource::Session)))
    }

    pub fn bearer(user: CurrentUser) -> Self {
        Identity(Some((user, AuthSource::Bearer)))
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.0.as_ref().map(|(user, _)| user)
    }

    pub fn source(&self) -> Option<AuthSource> {
        self.0.as_ref().map(|(_, source)| *source)
    }

    /// The user, if established through `source`.
    pub fn into_user_via(self, source: AuthSource) -> Option<CurrentUser> {
        match self.0 {
            Some((user, s)) if s == source => Some(user),
            _ => None,
        }
    }
}

fn identity_of(req: &HttpRequest) -> Identity {
    req.extensions().get::<Identity>().cloned().unwrap_or_default()
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(identity_of(req)))
    }
}

/// Extractor that requires a session user.
///
/// ```ignore
/// async fn show(user: LoggedIn) -> AppResult<HttpResponse> { ... }
/// ```
pub struct LoggedIn(pub CurrentUser);

impl FromRequest for LoggedIn {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            identity_of(req)
                .into_user_via(AuthSource::Session)
                .map(LoggedIn)
                .ok_or(AppError::LoginRequired),
        )
    }
}

/// Extractor that requires a verified API bearer token.
pub struct ApiUser(pub CurrentUser);

impl FromRequest for ApiUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            identity_of(req)
                .into_user_via(AuthSource::Bearer)
                .map(ApiUser)
                .ok_or_else(|| ApiError::unauthorized("Authorization Required")),
        )
    }
}

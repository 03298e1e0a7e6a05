//! Resolves the request identity once, before any handler runs.
//!
//! Routes under `/api` are identified by `Authorization: Bearer <token>` only;
//! a bearer token that fails verification short-circuits with 401 JSON. Every
//! other route is identified by the session cookie only, so foreign
//! `Authorization` headers (a basic-auth proxy, say) never reach the pages. A
//! stale session cookie just leaves the request anonymous.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use tracing::debug;

use crate::auth::session::SESSION_COOKIE;
use crate::auth::{API_ISSUER, Identity, SESSION_ISSUER, TokenKeys};
use crate::db::{DbPool, users};
use crate::error::{ApiError, AppError};
use crate::models::CurrentUser;

/// Identity middleware factory.
pub struct ResolveIdentity;

impl<S, B> Transform<S, ServiceRequest> for ResolveIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ResolveIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResolveIdentityMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ResolveIdentityMiddleware<S> {
    service: Rc<S>,
}

/// Prefix of the JSON API scope.
const API_PREFIX: &str = "/api";

fn is_api_path(path: &str) -> bool {
    path == API_PREFIX || path.starts_with("/api/")
}

/// Token of an `Authorization: Bearer <token>` header. Other schemes yield `None`.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl<S, B> Service<ServiceRequest> for ResolveIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let keys = req
                .app_data::<web::Data<TokenKeys>>()
                .cloned()
                .ok_or_else(|| AppError::Internal("Token keys not configured".to_string()))?;

            let identity = if is_api_path(req.path()) {
                match bearer_token(&req) {
                    Some(token) => match keys.verify(&token, API_ISSUER) {
                        Ok(claims) => Identity::bearer(CurrentUser {
                            id: claims.uid,
                            name: claims.name,
                        }),
                        Err(reason) => {
                            debug!(%reason, "Rejected bearer token");
                            let response =
                                ApiError::unauthorized("Authorization Invalid!").error_response();
                            return Ok(req.into_response(response).map_into_boxed_body());
                        }
                    },
                    None => Identity::anonymous(),
                }
            } else if let Some(cookie) = req.cookie(SESSION_COOKIE) {
                match keys.verify(cookie.value(), SESSION_ISSUER) {
                    Ok(claims) => {
                        let pool = req
                            .app_data::<web::Data<DbPool>>()
                            .cloned()
                            .ok_or_else(|| {
                                AppError::Internal("Database pool not configured".to_string())
                            })?;

                        // The user may have been removed since the cookie was issued
                        match users::find_by_id(pool.connection(), claims.uid).await? {
                            Some(user) => Identity::session(CurrentUser {
                                id: user.id,
                                name: user.name,
                            }),
                            None => Identity::anonymous(),
                        }
                    }
                    Err(reason) => {
                        debug!(%reason, "Ignoring stale session cookie");
                        Identity::anonymous()
                    }
                }
            } else {
                Identity::anonymous()
            };

            req.extensions_mut().insert(identity);
            service.call(req).await.map(ServiceResponse::map_into_boxed_body)
        })
    }
}

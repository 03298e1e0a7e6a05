//! Token login for API clients.

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::auth::TokenKeys;
use crate::db::DbPool;
use crate::db::users::{self, UserError};
use crate::error::{ApiError, ApiResult, AppError};
use crate::forms::LoginForm;
use crate::models::{CurrentUser, LoginResponse};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login);
}

/// Exchange a username and password for a bearer token valid for 24 hours.
///
/// POST /api/user/login (form encoded `username`, `password`)
#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = "Auth",
    request_body(
        content_type = "application/x-www-form-urlencoded",
        description = "Form fields `username` and `password`"
    ),
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing fields or bad credentials", body = crate::error::ErrorResponse)
    )
)]
#[post("/user/login")]
pub async fn login(
    form: web::Form<LoginForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> ApiResult<HttpResponse> {
    let failures = form.validate();
    if let Some(message) = failures.get("Username").or_else(|| failures.get("Password")) {
        return Err(ApiError::bad_request(message));
    }

    let user_id = match users::verify_user(pool.connection(), &form.username, &form.password).await
    {
        Ok(id) => id,
        Err(UserError::InvalidCredentials) => {
            return Err(ApiError::bad_request(
                &UserError::InvalidCredentials.to_string(),
            ));
        }
        Err(e) => return Err(AppError::from(e).into()),
    };

    let user = users::find_by_id(pool.connection(), user_id)
        .await?
        .map(|u| CurrentUser {
            id: u.id,
            name: u.name,
        })
        .ok_or_else(|| ApiError::bad_request(&UserError::InvalidCredentials.to_string()))?;

    let access_token = keys.issue_api_token(&user)?;
    info!(user_id, "API token issued");

    Ok(HttpResponse::Ok().json(LoginResponse { access_token }))
}

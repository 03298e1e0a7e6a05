//! Login and logout.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

use super::PageContext;
use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{AuthSource, Identity, LoggedIn, TokenKeys};
use crate::db::DbPool;
use crate::db::users::{self, UserError};
use crate::error::AppResult;
use crate::forms::{Failures, LoginForm};
use crate::models::CurrentUser;
use crate::views;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form).service(login).service(logout);
}

fn render_login(ctx: &PageContext, form: &LoginForm, failures: &Failures) -> HttpResponse {
    ctx.html(views::login_page(&ctx.layout("Login"), form, failures))
}

#[get("/user/login")]
pub async fn login_form(
    req: HttpRequest,
    identity: Identity,
    keys: web::Data<TokenKeys>,
) -> HttpResponse {
    let ctx = PageContext::new(&req, identity.into_user_via(AuthSource::Session), &keys);
    render_login(&ctx, &LoginForm::default(), &Failures::new())
}

#[post("/user/login")]
pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let ctx = PageContext::new(&req, None, &keys);

    let mut failures = form.validate();
    if !failures.is_empty() {
        return Ok(render_login(&ctx, &form, &failures));
    }

    let user_id = match users::verify_user(pool.connection(), &form.username, &form.password).await
    {
        Ok(id) => id,
        Err(UserError::InvalidCredentials) => {
            failures.insert("Generic", UserError::InvalidCredentials.to_string());
            return Ok(render_login(&ctx, &form, &failures));
        }
        Err(e) => return Err(e.into()),
    };

    let user = CurrentUser {
        id: user_id,
        name: form.username.trim().to_string(),
    };
    let token = keys.issue_session(&user)?;
    info!(user_id, "User logged in");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_cookie(token, keys.secure_cookies()))
        .finish())
}

#[post("/user/logout")]
pub async fn logout(user: LoggedIn, keys: web::Data<TokenKeys>) -> HttpResponse {
    info!(user_id = user.0.id, "User logged out");
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(clear_session_cookie(keys.secure_cookies()))
        .finish()
}

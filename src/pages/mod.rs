//! Browser routes: HTML pages, form posts and redirects.
//!
//! Every route except the login page takes a [`LoggedIn`](crate::auth::LoggedIn)
//! extractor, so an anonymous request is redirected to `/user/login` before the
//! handler runs.

mod catalog;
mod photos;
mod session;
mod worksheets;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::auth::TokenKeys;
use crate::auth::session::{clear_flash_cookie, flash_cookie, read_flash};
use crate::models::CurrentUser;
use crate::views::Layout;

/// Register all browser routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(session::configure_routes)
        .configure(catalog::configure_routes)
        .configure(worksheets::configure_routes)
        .configure(photos::configure_routes);
}

/// Per-request page state: who is viewing and the pending flash message.
pub(crate) struct PageContext {
    user: Option<CurrentUser>,
    flash: Option<String>,
    /// A flash cookie was read and must be expired by this response.
    consumed_flash: bool,
    secure_cookies: bool,
}

impl PageContext {
    pub(crate) fn new(req: &HttpRequest, user: Option<CurrentUser>, keys: &TokenKeys) -> Self {
        let flash = read_flash(req);
        PageContext {
            user,
            consumed_flash: flash.is_some(),
            flash,
            secure_cookies: keys.secure_cookies(),
        }
    }

    /// Show `message` on this page. A pending flash cookie is left for the
    /// next page.
    pub(crate) fn with_flash(mut self, message: &str) -> Self {
        self.flash = Some(message.to_string());
        self.consumed_flash = false;
        self
    }

    pub(crate) fn layout<'a>(&'a self, title: &'a str) -> Layout<'a> {
        Layout {
            title,
            user: self.user.as_ref(),
            flash: self.flash.as_deref(),
        }
    }

    /// 200 HTML response; expires the flash cookie once it has been shown.
    pub(crate) fn html(&self, body: String) -> HttpResponse {
        let mut builder = HttpResponse::Ok();
        builder.content_type("text/html; charset=utf-8");
        if self.consumed_flash {
            builder.cookie(clear_flash_cookie(self.secure_cookies));
        }
        builder.body(body)
    }
}

/// 303 redirect.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// 303 redirect carrying a flash message for the next page.
pub(crate) fn see_other_with_flash(location: &str, message: &str, keys: &TokenKeys) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(flash_cookie(message, keys.secure_cookies()))
        .finish()
}

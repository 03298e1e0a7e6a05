//! Session and flash cookies.
//!
//! - `bc_session`: signed session token carrying the user id, HttpOnly, persisted
//!   for the session lifetime so it survives browser restarts.
//! - `bc_flash`: one-shot message shown by the next rendered page, then cleared.

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

use super::token::SESSION_TTL_SECS;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "bc_session";
/// Flash message cookie name.
pub const FLASH_COOKIE: &str = "bc_flash";

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie
}

/// Session cookie holding a signed session token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(SESSION_COOKIE, token, secure);
    cookie.set_max_age(Duration::seconds(SESSION_TTL_SECS));
    cookie
}

/// Expired session cookie, sent on logout.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(SESSION_COOKIE, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

/// Flash cookie carrying `message` to the next page.
pub fn flash_cookie(message: &str, secure: bool) -> Cookie<'static> {
    base_cookie(FLASH_COOKIE, urlencoding::encode(message).into_owned(), secure)
}

/// Expired flash cookie, sent once the message has been shown.
pub fn clear_flash_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(FLASH_COOKIE, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

/// Pending flash message, if any.
pub fn read_flash(req: &HttpRequest) -> Option<String> {
    let cookie = req.cookie(FLASH_COOKIE)?;
    let message = urlencoding::decode(cookie.value()).ok()?.into_owned();
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

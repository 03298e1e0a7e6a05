//! Actix-web middleware.

mod identity;
mod request_logger;

pub use identity::ResolveIdentity;
pub use request_logger::RequestLogger;

use actix_web::middleware::DefaultHeaders;

/// Security headers sent with every response.
pub fn secure_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "deny"))
        .add(("X-XSS-Protection", "1; mode=block"))
}

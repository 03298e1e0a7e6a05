//! JSON API endpoint modules, mounted under `/api`.

pub mod auth;
pub mod health;
pub mod openapi;
pub mod worksheets;

use actix_web::web;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Register every API route on a `/api` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(auth::configure_routes)
        .configure(worksheets::configure_routes);
}

//! Board Checker library.
//!
//! Inspection worksheets grouped by team and zone, each with a photo gallery.
//! Browser pages for staff, a JSON API for field clients.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod pages;
pub mod services;
pub mod views;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::header;
use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::AppError;

/// CORS policy for the JSON API.
fn api_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::NotFound("Page".to_string()))
}

/// Mount the API, API docs, static assets, the photo store and browser pages.
///
/// Handlers expect `DbPool`, `TokenKeys`, `PhotoStore` and the upload cap
/// (`usize`) as app data, and `ResolveIdentity` wrapped around the app.
pub fn configure_app(
    static_dir: PathBuf,
    store_dir: PathBuf,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            SwaggerUi::new("/api/docs/{_:.*}").url("/api/openapi.json", api::ApiDoc::openapi()),
        )
        .service(
            web::scope("/api")
                .wrap(api_cors())
                .configure(api::configure_routes),
        )
        .service(Files::new("/static", static_dir).prefer_utf8(true))
        .service(Files::new("/store", store_dir))
        .configure(pages::configure_routes)
        .default_service(web::to(not_found));
    }
}

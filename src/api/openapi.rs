//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Board Checker API",
        version = "0.4.0",
        description = "Read access to worksheets and their photos, and photo upload for field clients"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::auth::login,
        // Worksheet endpoints
        api::worksheets::list_worksheets,
        api::worksheets::list_team_worksheets,
        api::worksheets::show_worksheet,
        api::worksheets::upload_photo,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            error::ErrorDetail,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Auth
            models::LoginResponse,
            // Worksheets
            models::WorksheetSummary,
            models::WorksheetListResponse,
            models::WorksheetView,
            models::WorksheetShowResponse,
            models::PhotoResponse,
            models::PageInfo,
            api::worksheets::UploadResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Bearer token login"),
        (name = "Worksheets", description = "Worksheets and photo upload")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add bearer token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

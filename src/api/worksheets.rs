//! Worksheet API endpoints.
//!
//! Reads are anonymous. Photo upload requires a bearer token from
//! `POST /api/user/login`.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::ApiUser;
use crate::db::DbPool;
use crate::error::{ApiError, ApiResult, AppError};
use crate::models::{
    ListQuery, PageInfo, PhotoResponse, WorksheetListResponse, WorksheetShowResponse,
    WorksheetSummary, WorksheetView,
};
use crate::services::{PhotoStore, receive_photo, save_photo};

/// Upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub status: &'static str,
}

/// Host for absolute photo URLs: the request's own `Host` header.
///
/// Forwarding headers are not consulted.
fn request_host(req: &HttpRequest) -> String {
    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| req.app_config().host().to_string())
}

/// Configure worksheet API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_worksheets)
        .service(list_team_worksheets)
        .service(show_worksheet)
        .service(upload_photo);
}

/// List worksheets, newest first.
///
/// GET /api/worksheets?q=&start=&maxResults=
#[utoipa::path(
    get,
    path = "/api/worksheets",
    tag = "Worksheets",
    params(
        ("q" = Option<String>, Query, description = "Worksheet number substring"),
        ("start" = Option<u64>, Query, description = "Offset (default: 0)"),
        ("maxResults" = Option<u64>, Query, description = "Page size (default: 100)")
    ),
    responses(
        (status = 200, description = "Worksheets", body = WorksheetListResponse)
    )
)]
#[get("/worksheets")]
pub async fn list_worksheets(
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let (worksheets, _) = pool.list_worksheets(&query).await?;

    Ok(HttpResponse::Ok().json(WorksheetListResponse {
        worksheets: worksheets.iter().map(WorksheetSummary::from).collect(),
    }))
}

/// List the worksheets assigned to a team.
///
/// GET /api/team/{id}/worksheets
#[utoipa::path(
    get,
    path = "/api/team/{id}/worksheets",
    tag = "Worksheets",
    params(
        ("id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Worksheets of the team", body = WorksheetListResponse),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/team/{id:[0-9]+}/worksheets")]
pub async fn list_team_worksheets(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let team = pool
        .get_team(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {}", id)))?;
    let worksheets = pool.list_worksheets_by_team(team.id).await?;

    Ok(HttpResponse::Ok().json(WorksheetListResponse {
        worksheets: worksheets.iter().map(WorksheetSummary::from).collect(),
    }))
}

/// Worksheet details with one page of photos.
///
/// GET /api/worksheet/{id}?q=&start=&maxResults=
#[utoipa::path(
    get,
    path = "/api/worksheet/{id}",
    tag = "Worksheets",
    params(
        ("id" = i32, Path, description = "Worksheet ID"),
        ("q" = Option<String>, Query, description = "Photo file name substring"),
        ("start" = Option<u64>, Query, description = "Offset (default: 0)"),
        ("maxResults" = Option<u64>, Query, description = "Page size (default: 100)")
    ),
    responses(
        (status = 200, description = "Worksheet details", body = WorksheetShowResponse),
        (status = 404, description = "Worksheet not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/worksheet/{id:[0-9]+}")]
pub async fn show_worksheet(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let detail = pool
        .get_worksheet(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Worksheet {}", id)))?;

    let (photos, total) = pool.list_photos(detail.id, &query).await?;
    let host = request_host(&req);

    Ok(HttpResponse::Ok().json(WorksheetShowResponse {
        worksheet: WorksheetView::from(&detail),
        photos: photos
            .iter()
            .map(|p| PhotoResponse::from_model(p, &host))
            .collect(),
        page_info: PageInfo::new(total, query.max_results),
    }))
}

/// Upload one photo (multipart fields `uploadFile`, optional `running_number`).
///
/// POST /api/worksheet/{id}/photo/new
#[utoipa::path(
    post,
    path = "/api/worksheet/{id}/photo/new",
    tag = "Worksheets",
    params(
        ("id" = i32, Path, description = "Worksheet ID")
    ),
    request_body(
        content_type = "multipart/form-data",
        description = "`uploadFile` file part and optional `running_number`"
    ),
    responses(
        (status = 200, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "No file or invalid file name", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorResponse),
        (status = 404, description = "Worksheet not found", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::error::ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[post("/worksheet/{id:[0-9]+}/photo/new")]
pub async fn upload_photo(
    user: ApiUser,
    path: web::Path<i32>,
    mut payload: Multipart,
    pool: web::Data<DbPool>,
    store: web::Data<PhotoStore>,
    max_upload_size: web::Data<usize>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let detail = pool
        .get_worksheet(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Worksheet {}", id)))?;

    let uploaded = receive_photo(&mut payload, &store, *max_upload_size.get_ref()).await?;
    let file = uploaded
        .file
        .ok_or_else(|| ApiError::bad_request("Please choose file!"))?;

    let photo = save_photo(&pool, &store, detail.id, file, uploaded.running_number).await?;
    info!(
        worksheet_id = detail.id,
        photo_id = photo.id,
        user_id = user.0.id,
        "Photo uploaded via API"
    );

    Ok(HttpResponse::Ok().json(UploadResponse { status: "Success" }))
}

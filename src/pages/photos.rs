//! Photo upload form.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

use super::worksheets::find_worksheet;
use super::{PageContext, see_other_with_flash};
use crate::auth::{LoggedIn, TokenKeys};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::services::{PhotoStore, receive_photo, save_photo};
use crate::views;

const SAVED: &str = "File was saved successfully!";
const NO_FILE: &str = "Please choose file!";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(new_photo).service(upload_photo);
}

#[get("/worksheet/{id:[0-9]+}/photo/new")]
pub async fn new_photo(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let detail = find_worksheet(&pool, path.into_inner()).await?;
    let ctx = PageContext::new(&req, Some(user.0), &keys);
    let title = format!("Upload to {}", detail.number);
    Ok(ctx.html(views::photo_form(&ctx.layout(&title), &detail)))
}

/// Store the file, record the photo, back to the worksheet.
///
/// A form without a file re-renders with a notice instead of failing.
#[allow(clippy::too_many_arguments)]
#[post("/worksheet/{id:[0-9]+}/photo/new")]
pub async fn upload_photo(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    mut payload: Multipart,
    pool: web::Data<DbPool>,
    store: web::Data<PhotoStore>,
    max_upload_size: web::Data<usize>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let detail = find_worksheet(&pool, path.into_inner()).await?;

    let uploaded = receive_photo(&mut payload, &store, *max_upload_size.get_ref()).await?;

    let Some(file) = uploaded.file else {
        let ctx = PageContext::new(&req, Some(user.0), &keys).with_flash(NO_FILE);
        let title = format!("Upload to {}", detail.number);
        return Ok(ctx.html(views::photo_form(&ctx.layout(&title), &detail)));
    };

    let photo = save_photo(&pool, &store, detail.id, file, uploaded.running_number).await?;
    info!(worksheet_id = detail.id, photo_id = photo.id, "Photo uploaded");

    Ok(see_other_with_flash(
        &format!("/worksheet/{}", detail.id),
        SAVED,
        &keys,
    ))
}

//! Worksheet pages: home listing, details, create, edit, delete, download and
//! the by-date, by-zone and by-team listings.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::NaiveDate;
use tracing::info;

use super::{PageContext, see_other, see_other_with_flash};
use crate::auth::{LoggedIn, TokenKeys};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::forms::WorksheetForm;
use crate::models::{ListQuery, PageInfo, WorksheetDetail};
use crate::services::{PhotoStore, build_archive, storage::TEMP_DIR};
use crate::views::{self, WorksheetChoices};

const SAVED: &str = "Worksheet was saved successfully!";
const DELETED: &str = "Worksheet was deleted successfully!";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(new_worksheet)
        .service(create_worksheet)
        .service(list_by_date)
        .service(list_by_zone)
        .service(list_by_team)
        .service(show_worksheet)
        .service(edit_worksheet)
        .service(update_worksheet)
        .service(delete_worksheet)
        .service(download_worksheet);
}

/// Worksheet with names, or 404.
pub(crate) async fn find_worksheet(pool: &DbPool, id: i32) -> AppResult<WorksheetDetail> {
    pool.get_worksheet(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Worksheet {}", id)))
}

async fn render_form(
    ctx: &PageContext,
    pool: &DbPool,
    existing: Option<&WorksheetDetail>,
) -> AppResult<HttpResponse> {
    let teams = pool.list_teams().await?;
    let zones = pool.list_zones().await?;
    let title = match existing {
        Some(d) => format!("Edit {}", d.number),
        None => "New Worksheet".to_string(),
    };

    let html = views::worksheet_form(
        &ctx.layout(&title),
        existing,
        WorksheetChoices {
            teams: &teams,
            zones: &zones,
        },
    );
    Ok(ctx.html(html))
}

#[get("/")]
pub async fn home(
    req: HttpRequest,
    user: LoggedIn,
    query: web::Query<ListQuery>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let dates = pool.list_distinct_dates().await?;
    let (worksheets, total) = pool.list_worksheets(&query).await?;

    let mut info = PageInfo::new(total, query.max_results);
    info.config_paginations(&query.page_url("/"), query.start);

    let ctx = PageContext::new(&req, Some(user.0), &keys);
    let html = views::home_page(&ctx.layout("Home"), &dates, &worksheets, &info, &query);
    Ok(ctx.html(html))
}

#[get("/worksheet/new")]
pub async fn new_worksheet(
    req: HttpRequest,
    user: LoggedIn,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let ctx = PageContext::new(&req, Some(user.0), &keys);
    render_form(&ctx, &pool, None).await
}

#[post("/worksheet/new")]
pub async fn create_worksheet(
    _user: LoggedIn,
    form: web::Form<WorksheetForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let created = pool.insert_worksheet(&form.to_input()).await?;
    info!(worksheet_id = created.id, number = %created.number, "Worksheet created");
    Ok(see_other_with_flash(
        &format!("/worksheet/{}", created.id),
        SAVED,
        &keys,
    ))
}

#[get("/worksheet/{id:[0-9]+}")]
pub async fn show_worksheet(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    query: web::Query<ListQuery>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let detail = find_worksheet(&pool, path.into_inner()).await?;
    let (photos, total) = pool.list_photos(detail.id, &query).await?;

    let mut info = PageInfo::new(total, query.max_results);
    info.config_paginations(
        &query.page_url(&format!("/worksheet/{}", detail.id)),
        query.start,
    );

    let ctx = PageContext::new(&req, Some(user.0), &keys);
    let html = views::worksheet_show(&ctx.layout(&detail.number), &detail, &photos, &info, &query);
    Ok(ctx.html(html))
}

#[get("/worksheet/{id:[0-9]+}/edit")]
pub async fn edit_worksheet(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let detail = find_worksheet(&pool, path.into_inner()).await?;
    let ctx = PageContext::new(&req, Some(user.0), &keys);
    render_form(&ctx, &pool, Some(&detail)).await
}

#[post("/worksheet/{id:[0-9]+}/edit")]
pub async fn update_worksheet(
    _user: LoggedIn,
    path: web::Path<i32>,
    form: web::Form<WorksheetForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let detail = find_worksheet(&pool, path.into_inner()).await?;
    pool.update_worksheet(detail.id, &form.to_input()).await?;
    Ok(see_other_with_flash(
        &format!("/worksheet/{}", detail.id),
        SAVED,
        &keys,
    ))
}

/// Removes the row only; photos and stored files are kept.
#[post("/worksheet/{id:[0-9]+}/delete")]
pub async fn delete_worksheet(
    user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !pool.delete_worksheet(id).await? {
        return Err(AppError::NotFound(format!("Worksheet {}", id)));
    }

    info!(worksheet_id = id, user_id = user.0.id, "Worksheet deleted");
    Ok(see_other_with_flash("/", DELETED, &keys))
}

/// Zip the worksheet's photos and send the browser to the archive.
#[get("/worksheet/{id:[0-9]+}/download")]
pub async fn download_worksheet(
    _user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    store: web::Data<PhotoStore>,
) -> AppResult<HttpResponse> {
    let detail = find_worksheet(&pool, path.into_inner()).await?;

    let store = store.get_ref().clone();
    let id = detail.id;
    web::block(move || build_archive(&store, id)).await??;

    Ok(see_other(&format!(
        "/store/{}/{}",
        TEMP_DIR,
        PhotoStore::archive_name(id)
    )))
}

#[get("/worksheet/date/{date}")]
pub async fn list_by_date(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| AppError::NotFound(format!("Date {}", raw)))?;
    let worksheets = pool.list_worksheets_by_date(date).await?;

    let ctx = PageContext::new(&req, Some(user.0), &keys);
    let title = format!("Worksheets on {}", date.format("%Y-%m-%d"));
    Ok(ctx.html(views::worksheet_list(&ctx.layout(&title), &worksheets)))
}

#[get("/worksheet/zone/{id:[0-9]+}")]
pub async fn list_by_zone(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let zone = pool
        .get_zone(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Zone {}", id)))?;
    let worksheets = pool.list_worksheets_by_zone(zone.id).await?;

    let ctx = PageContext::new(&req, Some(user.0), &keys);
    let title = format!("Worksheets in zone {}", zone.name);
    Ok(ctx.html(views::worksheet_list(&ctx.layout(&title), &worksheets)))
}

#[get("/worksheet/team/{id:[0-9]+}")]
pub async fn list_by_team(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let team = pool
        .get_team(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {}", id)))?;
    let worksheets = pool.list_worksheets_by_team(team.id).await?;

    let ctx = PageContext::new(&req, Some(user.0), &keys);
    let title = format!("Worksheets of team {}", team.name);
    Ok(ctx.html(views::worksheet_list(&ctx.layout(&title), &worksheets)))
}

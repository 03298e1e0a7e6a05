//! Team and zone pages.

use actix_web::{HttpRequest, HttpResponse, get, post, web};

use super::{PageContext, see_other_with_flash};
use crate::auth::{LoggedIn, TokenKeys};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::forms::{TeamForm, ZoneForm};
use crate::views::{self, Catalog};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index_teams)
        .service(new_team)
        .service(create_team)
        .service(edit_team)
        .service(update_team)
        .service(index_zones)
        .service(new_zone)
        .service(create_zone)
        .service(edit_zone)
        .service(update_zone);
}

async fn list(pool: &DbPool, kind: Catalog) -> AppResult<Vec<(i32, String)>> {
    let items = match kind {
        Catalog::Team => pool
            .list_teams()
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect(),
        Catalog::Zone => pool
            .list_zones()
            .await?
            .into_iter()
            .map(|z| (z.id, z.name))
            .collect(),
    };
    Ok(items)
}

async fn find(pool: &DbPool, kind: Catalog, id: i32) -> AppResult<(i32, String)> {
    let found = match kind {
        Catalog::Team => pool.get_team(id).await?.map(|t| (t.id, t.name)),
        Catalog::Zone => pool.get_zone(id).await?.map(|z| (z.id, z.name)),
    };
    found.ok_or_else(|| AppError::NotFound(format!("{} {}", kind.label(), id)))
}

fn render_index(ctx: &PageContext, kind: Catalog, items: &[(i32, String)]) -> HttpResponse {
    let title = format!("{}s", kind.label());
    ctx.html(views::catalog_index(&ctx.layout(&title), kind, items))
}

fn render_form(ctx: &PageContext, kind: Catalog, existing: Option<(i32, &str)>) -> HttpResponse {
    let title = match existing {
        Some(_) => format!("Edit {}", kind.label()),
        None => format!("New {}", kind.label()),
    };
    ctx.html(views::catalog_form(&ctx.layout(&title), kind, existing))
}

async fn show_index(
    req: &HttpRequest,
    user: LoggedIn,
    pool: &DbPool,
    keys: &TokenKeys,
    kind: Catalog,
) -> AppResult<HttpResponse> {
    let items = list(pool, kind).await?;
    let ctx = PageContext::new(req, Some(user.0), keys);
    Ok(render_index(&ctx, kind, &items))
}

async fn show_edit(
    req: &HttpRequest,
    user: LoggedIn,
    pool: &DbPool,
    keys: &TokenKeys,
    kind: Catalog,
    id: i32,
) -> AppResult<HttpResponse> {
    let (id, name) = find(pool, kind, id).await?;
    let ctx = PageContext::new(req, Some(user.0), keys);
    Ok(render_form(&ctx, kind, Some((id, &name))))
}

// Teams

#[get("/teams")]
pub async fn index_teams(
    req: HttpRequest,
    user: LoggedIn,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    show_index(&req, user, &pool, &keys, Catalog::Team).await
}

#[get("/team/new")]
pub async fn new_team(
    req: HttpRequest,
    user: LoggedIn,
    keys: web::Data<TokenKeys>,
) -> HttpResponse {
    let ctx = PageContext::new(&req, Some(user.0), &keys);
    render_form(&ctx, Catalog::Team, None)
}

#[post("/team/new")]
pub async fn create_team(
    _user: LoggedIn,
    form: web::Form<TeamForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    pool.insert_team(&form.team_name).await?;
    Ok(see_other_with_flash(
        Catalog::Team.index_path(),
        Catalog::Team.saved_message(),
        &keys,
    ))
}

#[get("/team/{id:[0-9]+}/edit")]
pub async fn edit_team(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    show_edit(&req, user, &pool, &keys, Catalog::Team, path.into_inner()).await
}

#[post("/team/{id:[0-9]+}/edit")]
pub async fn update_team(
    _user: LoggedIn,
    path: web::Path<i32>,
    form: web::Form<TeamForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let (id, _) = find(&pool, Catalog::Team, path.into_inner()).await?;
    pool.update_team(id, &form.team_name).await?;
    Ok(see_other_with_flash(
        Catalog::Team.index_path(),
        Catalog::Team.saved_message(),
        &keys,
    ))
}

// Zones

#[get("/zones")]
pub async fn index_zones(
    req: HttpRequest,
    user: LoggedIn,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    show_index(&req, user, &pool, &keys, Catalog::Zone).await
}

#[get("/zone/new")]
pub async fn new_zone(
    req: HttpRequest,
    user: LoggedIn,
    keys: web::Data<TokenKeys>,
) -> HttpResponse {
    let ctx = PageContext::new(&req, Some(user.0), &keys);
    render_form(&ctx, Catalog::Zone, None)
}

#[post("/zone/new")]
pub async fn create_zone(
    _user: LoggedIn,
    form: web::Form<ZoneForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    pool.insert_zone(&form.zone_name).await?;
    Ok(see_other_with_flash(
        Catalog::Zone.index_path(),
        Catalog::Zone.saved_message(),
        &keys,
    ))
}

#[get("/zone/{id:[0-9]+}/edit")]
pub async fn edit_zone(
    req: HttpRequest,
    user: LoggedIn,
    path: web::Path<i32>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    show_edit(&req, user, &pool, &keys, Catalog::Zone, path.into_inner()).await
}

#[post("/zone/{id:[0-9]+}/edit")]
pub async fn update_zone(
    _user: LoggedIn,
    path: web::Path<i32>,
    form: web::Form<ZoneForm>,
    pool: web::Data<DbPool>,
    keys: web::Data<TokenKeys>,
) -> AppResult<HttpResponse> {
    let (id, _) = find(&pool, Catalog::Zone, path.into_inner()).await?;
    pool.update_zone(id, &form.zone_name).await?;
    Ok(see_other_with_flash(
        Catalog::Zone.index_path(),
        Catalog::Zone.saved_message(),
        &keys,
    ))
}

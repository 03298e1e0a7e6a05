//! Shared test helpers for web E2E tests.

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::{App, test, web};
use board_checker_lib::auth::TokenKeys;
use board_checker_lib::auth::session::SESSION_COOKIE;
use board_checker_lib::config::{Config, DatabaseSettings, Environment};
use board_checker_lib::db::{DbPool, users};
use board_checker_lib::middleware::ResolveIdentity;
use board_checker_lib::services::PhotoStore;
use secrecy::SecretString;
use tempfile::TempDir;

pub const TEST_USER: &str = "inspector";
pub const TEST_PASSWORD: &str = "correct horse battery";
pub const BOUNDARY: &str = "----board-checker-test-boundary";

/// Everything one test needs. The temp dir lives as long as the harness.
pub struct Harness {
    pub dir: TempDir,
    pub config: Config,
    pub pool: DbPool,
    pub keys: TokenKeys,
    pub store: PhotoStore,
}

/// Fresh SQLite database and photo store, migrated, with one user.
pub async fn setup() -> Harness {
    setup_with(true).await
}

/// Like [`setup`], choosing whether worksheets need a resolvable zone and team.
pub async fn setup_with(require_assignment: bool) -> Harness {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("board.db");
    let store_dir = dir.path().join("store");
    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");

    let config = Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseSettings {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
            max_connections: 2,
            min_connections: 1,
        },
        static_dir,
        store_dir: store_dir.clone(),
        secret: SecretString::from("test-secret-for-web-e2e".to_string()),
        require_assignment,
        max_upload_size: 1024 * 1024,
    };

    let pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");

    users::insert_user(pool.connection(), TEST_USER, TEST_PASSWORD)
        .await
        .expect("Failed to create test user");

    let store = PhotoStore::new(store_dir);
    store
        .ensure_layout()
        .await
        .expect("Failed to create store layout");

    let keys = TokenKeys::new(config.secret.clone(), false);

    Harness {
        dir,
        config,
        pool,
        keys,
        store,
    }
}

/// Create a test app wired like the server.
pub async fn create_test_app(
    h: &Harness,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(ResolveIdentity)
            .app_data(web::Data::new(h.pool.clone()))
            .app_data(web::Data::new(h.keys.clone()))
            .app_data(web::Data::new(h.store.clone()))
            .app_data(web::Data::new(h.config.max_upload_size))
            .app_data(web::PayloadConfig::new(h.config.max_upload_size))
            .configure(board_checker_lib::configure_app(
                h.config.static_dir.clone(),
                h.config.store_dir.clone(),
            )),
    )
    .await
}

/// Location header of a redirect response.
pub fn location(resp: &ServiceResponse) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Log in through the browser form and return the session cookie.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_form([("username", TEST_USER), ("password", TEST_PASSWORD)])
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 303, "Login should redirect");

    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("Login should set the session cookie")
}

/// Log in through the API and return the bearer token.
pub async fn api_token<S>(app: &S) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_form([("username", TEST_USER), ("password", TEST_PASSWORD)])
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "API login should succeed");

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["access_token"]
        .as_str()
        .expect("Response should carry access_token")
        .to_string()
}

/// Create a zone, a team and a worksheet assigned to both. Returns the worksheet id.
pub async fn seed_worksheet(h: &Harness, number: &str) -> i32 {
    let zone = h.pool.insert_zone("North").await.expect("insert zone");
    let team = h.pool.insert_team("Alpha").await.expect("insert team");
    let input = board_checker_lib::models::WorksheetInput {
        number: number.to_string(),
        name: format!("Board {}", number),
        zone_id: Some(zone.id),
        team_id: Some(team.id),
    };
    h.pool
        .insert_worksheet(&input)
        .await
        .expect("insert worksheet")
        .id
}

/// Multipart body with an `uploadFile` part and optional running number.
///
/// Without a file the part is sent the way a browser sends an empty file
/// input: `filename=""` and no content.
pub fn multipart_body(file: Option<(&str, &[u8])>, running_number: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(n) = running_number {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"running_number\"\r\n\r\n{n}\r\n"
            )
            .as_bytes(),
        );
    }

    let (name, bytes) = file.unwrap_or_default();
    let content_type = if name.is_empty() {
        "application/octet-stream"
    } else {
        "image/jpeg"
    };
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"uploadFile\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Content-Type header value matching [`multipart_body`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

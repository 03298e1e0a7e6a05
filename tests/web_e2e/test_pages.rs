//! E2E tests: browser pages, login sessions and worksheet upsert.

use actix_web::test;

use board_checker_lib::models::WorksheetInput;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_anonymous_home_redirects_to_login() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/user/login");
}

#[actix_rt::test]
async fn test_login_sets_session_and_opens_home() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    seed_worksheet(&h, "WS-001").await;

    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("WS-001"), "Home should list the worksheet");
    assert!(html.contains("/user/logout"), "Logged-in nav should offer logout");
}

#[actix_rt::test]
async fn test_wrong_password_rerenders_login() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_form([("username", TEST_USER), ("password", "wrong")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Username or Password is incorrect"));
}

#[actix_rt::test]
async fn test_login_requires_both_fields() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_form([("username", ""), ("password", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Username is required"));
    assert!(html.contains("Password is required"));
}

#[actix_rt::test]
async fn test_bearer_token_does_not_open_pages() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let token = api_token(&app).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
}

#[actix_rt::test]
async fn test_basic_auth_header_is_ignored_by_pages() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::get()
        .uri("/user/login")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let cookie = login_cookie(&app).await;
    let req = test::TestRequest::get()
        .uri("/")
        .cookie(cookie)
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_invalid_bearer_does_not_break_pages() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(cookie)
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_missing_worksheet_is_404() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::get()
        .uri("/worksheet/999")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_unknown_route_is_404() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::get().uri("/no/such/page").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_create_then_edit_keeps_id() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let zone = h.pool.insert_zone("East").await.expect("insert zone");
    let team = h.pool.insert_team("Bravo").await.expect("insert team");
    let zone_id = zone.id.to_string();
    let team_id = team.id.to_string();

    let req = test::TestRequest::post()
        .uri("/worksheet/new")
        .cookie(cookie.clone())
        .set_form([
            ("worksheet_number", "WS-100"),
            ("worksheet_name", "Panel A"),
            ("worksheet_zone_id", zone_id.as_str()),
            ("worksheet_team_id", team_id.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 303);

    let created_at = location(&resp);
    let id: i32 = created_at
        .trim_start_matches("/worksheet/")
        .parse()
        .expect("Redirect should point at the new worksheet");

    let req = test::TestRequest::post()
        .uri(&format!("/worksheet/{}/edit", id))
        .cookie(cookie.clone())
        .set_form([
            ("worksheet_number", "WS-100"),
            ("worksheet_name", "Panel B"),
            ("worksheet_zone_id", zone_id.as_str()),
            ("worksheet_team_id", team_id.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), created_at);

    let detail = h
        .pool
        .get_worksheet(id)
        .await
        .expect("query worksheet")
        .expect("worksheet exists");
    assert_eq!(detail.name, "Panel B");
    assert_eq!(detail.zone_name.as_deref(), Some("East"));
    assert_eq!(detail.team_name.as_deref(), Some("Bravo"));

    let (all, total) = h
        .pool
        .list_worksheets(&Default::default())
        .await
        .expect("list worksheets");
    assert_eq!(total, 1);
    assert_eq!(all.len(), 1);
}

#[actix_rt::test]
async fn test_edit_missing_worksheet_is_404() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::post()
        .uri("/worksheet/4242/edit")
        .cookie(cookie)
        .set_form([("worksheet_number", "WS-X"), ("worksheet_name", "Ghost")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_delete_flashes_and_removes() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;
    let id = seed_worksheet(&h, "WS-200").await;

    let req = test::TestRequest::post()
        .uri(&format!("/worksheet/{}/delete", id))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/");

    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == board_checker_lib::auth::session::FLASH_COOKIE)
        .map(|c| c.into_owned())
        .expect("Delete should set a flash");

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(cookie.clone())
        .cookie(flash)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Worksheet was deleted successfully!"));

    let req = test::TestRequest::get()
        .uri(&format!("/worksheet/{}", id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_listing_by_team_and_zone() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;
    let id = seed_worksheet(&h, "WS-300").await;
    let detail = h
        .pool
        .get_worksheet(id)
        .await
        .expect("query worksheet")
        .expect("worksheet exists");

    for path in [
        format!("/worksheet/team/{}", detail.team_id.unwrap_or_default()),
        format!("/worksheet/zone/{}", detail.zone_id.unwrap_or_default()),
    ] {
        let req = test::TestRequest::get()
            .uri(&path)
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "{} should render", path);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("WS-300"));
    }

    let req = test::TestRequest::get()
        .uri("/worksheet/team/999")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_invalid_date_listing_is_404() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::get()
        .uri("/worksheet/date/not-a-date")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_logout_clears_session() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::post()
        .uri("/user/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 303);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == board_checker_lib::auth::session::SESSION_COOKIE)
        .expect("Logout should overwrite the session cookie");
    assert!(cleared.value().is_empty());
}

#[actix_rt::test]
async fn test_unassigned_worksheet_is_404_by_default() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;
    let id = h
        .pool
        .insert_worksheet(&WorksheetInput {
            number: "WS-700".to_string(),
            name: "Loose board".to_string(),
            zone_id: None,
            team_id: None,
        })
        .await
        .expect("insert worksheet")
        .id;

    let req = test::TestRequest::get()
        .uri(&format!("/worksheet/{}", id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get()
        .uri(&format!("/api/worksheet/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_unassigned_worksheet_opens_when_not_required() {
    let h = setup_with(false).await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;
    let id = h
        .pool
        .insert_worksheet(&WorksheetInput {
            number: "WS-701".to_string(),
            name: "Loose board".to_string(),
            zone_id: None,
            team_id: None,
        })
        .await
        .expect("insert worksheet")
        .id;

    let req = test::TestRequest::get()
        .uri(&format!("/worksheet/{}", id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("WS-701"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/worksheet/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_home_paginates_and_searches() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;
    seed_worksheet(&h, "WS-801").await;
    seed_worksheet(&h, "WS-802").await;
    seed_worksheet(&h, "XY-900").await;

    let req = test::TestRequest::get()
        .uri("/?maxResults=2")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("start=2&amp;maxResults=2"));

    let req = test::TestRequest::get()
        .uri("/?q=WS-")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("WS-801"));
    assert!(html.contains("WS-802"));
    assert!(!html.contains("XY-900"));
}

#[actix_rt::test]
async fn test_worksheet_page_filters_photos() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;
    let id = seed_worksheet(&h, "WS-803").await;
    for name in ["front.jpg", "back.jpg", "front-left.jpg"] {
        h.pool
            .insert_photo(id, None, name)
            .await
            .expect("insert photo");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/worksheet/{}?q=front", id))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("front.jpg"));
    assert!(html.contains("front-left.jpg"));
    assert!(!html.contains("back.jpg"));

    let req = test::TestRequest::get()
        .uri(&format!("/worksheet/{}?maxResults=1&start=1", id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("back.jpg"));
    assert!(!html.contains("front-left.jpg"));
    assert!(html.contains("start=2&amp;maxResults=1"));
}

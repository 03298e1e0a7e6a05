//! E2E tests: JSON API, bearer tokens and API photo upload.

use actix_web::test;
use serde_json::Value;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_api_login_rejects_bad_credentials() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_form([("username", TEST_USER), ("password", "nope")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"]["message"],
        "Username or Password is incorrect"
    );
}

#[actix_rt::test]
async fn test_api_login_reports_missing_username_first() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_form([("username", ""), ("password", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Username is required");
}

#[actix_rt::test]
async fn test_invalid_bearer_token_is_401() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::get()
        .uri("/api/worksheets")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Authorization Invalid!");
}

#[actix_rt::test]
async fn test_session_token_is_not_a_bearer_token() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::get()
        .uri("/api/worksheets")
        .insert_header(("Authorization", format!("Bearer {}", cookie.value())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_list_and_show_worksheet() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let id = seed_worksheet(&h, "WS-500").await;
    h.pool
        .insert_photo(id, None, "a.jpg")
        .await
        .expect("insert photo");

    let req = test::TestRequest::get().uri("/api/worksheets").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let list = body["worksheets"].as_array().expect("worksheets array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["number"], "WS-500");

    let req = test::TestRequest::get()
        .uri(&format!("/api/worksheet/{}", id))
        .insert_header(("Host", "boards.local"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["worksheet"]["zoneName"], "North");
    assert_eq!(body["worksheet"]["teamName"], "Alpha");
    assert_eq!(body["photos"][0]["runningNumber"], 1);
    assert_eq!(
        body["photos"][0]["fileURL"],
        format!("http://boards.local/store/{}/a.jpg", id)
    );
}

#[actix_rt::test]
async fn test_show_missing_worksheet_is_404_json() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::get().uri("/api/worksheet/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"].is_string());
}

#[actix_rt::test]
async fn test_team_worksheets() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let id = seed_worksheet(&h, "WS-501").await;
    let team_id = h
        .pool
        .get_worksheet(id)
        .await
        .expect("query worksheet")
        .and_then(|d| d.team_id)
        .expect("worksheet has a team");

    let req = test::TestRequest::get()
        .uri(&format!("/api/team/{}/worksheets", team_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["worksheets"][0]["id"], id);

    let req = test::TestRequest::get()
        .uri("/api/team/999/worksheets")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_api_upload_requires_token() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let id = seed_worksheet(&h, "WS-502").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/worksheet/{}/photo/new", id))
        .insert_header(("Content-Type", multipart_content_type()))
        .set_payload(multipart_body(Some(("a.jpg", b"a")), None))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_api_upload_with_token() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let token = api_token(&app).await;
    let id = seed_worksheet(&h, "WS-503").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/worksheet/{}/photo/new", id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", multipart_content_type()))
        .set_payload(multipart_body(Some(("side.jpg", b"side")), None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Success");
    assert!(h.store.photo_path(id, "side.jpg").exists());
}

#[actix_rt::test]
async fn test_api_upload_without_file_is_400() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let token = api_token(&app).await;
    let id = seed_worksheet(&h, "WS-504").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/worksheet/{}/photo/new", id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", multipart_content_type()))
        .set_payload(multipart_body(None, None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Please choose file!");
}

#[actix_rt::test]
async fn test_health() {
    let h = setup().await;
    let app = create_test_app(&h).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get().uri("/api/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_show_worksheet_pages_photos() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let id = seed_worksheet(&h, "WS-505").await;
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        h.pool
            .insert_photo(id, None, name)
            .await
            .expect("insert photo");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/worksheet/{}?maxResults=2", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["photos"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["pageInfo"]["totalResults"], 3);
    assert_eq!(body["pageInfo"]["maxResults"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/worksheet/{}?maxResults=2&start=2", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let photos = body["photos"].as_array().expect("photos array");
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["runningNumber"], 3);

    let req = test::TestRequest::get()
        .uri(&format!("/api/worksheet/{}?q=b.j", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pageInfo"]["totalResults"], 1);
    let url = body["photos"][0]["fileURL"].as_str().expect("fileURL string");
    assert!(url.ends_with(&format!("/store/{}/b.jpg", id)));
}

#[actix_rt::test]
async fn test_file_url_uses_host_header() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let id = seed_worksheet(&h, "WS-506").await;
    h.pool
        .insert_photo(id, None, "a.jpg")
        .await
        .expect("insert photo");

    let req = test::TestRequest::get()
        .uri(&format!("/api/worksheet/{}", id))
        .insert_header(("Host", "boards.local"))
        .insert_header(("X-Forwarded-Host", "attacker.example"))
        .insert_header(("Forwarded", "host=attacker.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["photos"][0]["fileURL"],
        format!("http://boards.local/store/{}/a.jpg", id)
    );
}

#[actix_rt::test]
async fn test_basic_auth_header_is_not_a_bearer_token() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    seed_worksheet(&h, "WS-507").await;

    let req = test::TestRequest::get()
        .uri("/api/worksheets")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let id = seed_worksheet(&h, "WS-508").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/worksheet/{}/photo/new", id))
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .insert_header(("Content-Type", multipart_content_type()))
        .set_payload(multipart_body(Some(("a.jpg", b"a")), None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

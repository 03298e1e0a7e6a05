//! E2E tests: team and zone catalog pages.

use actix_web::test;
use board_checker_lib::auth::session::FLASH_COOKIE;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_teams_are_created_and_listed_by_name() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::get()
        .uri("/teams")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("There's nothing to see here yet!"));

    let mut flash = None;
    for name in ["Zulu", "Alpha"] {
        let req = test::TestRequest::post()
            .uri("/team/new")
            .cookie(cookie.clone())
            .set_form([("team_name", name)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/teams");
        flash = resp
            .response()
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .map(|c| c.into_owned());
    }
    let flash = flash.expect("Save should set a flash cookie");

    let req = test::TestRequest::get()
        .uri("/teams")
        .cookie(cookie)
        .cookie(flash)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("Team was saved successfully!"));

    let alpha = html.find(">Alpha<").expect("Alpha listed");
    let zulu = html.find(">Zulu<").expect("Zulu listed");
    assert!(alpha < zulu, "Teams should be ordered by name");
}

#[actix_rt::test]
async fn test_team_edit_renames() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;
    let team = h.pool.insert_team("Bravo").await.expect("insert team");

    let req = test::TestRequest::get()
        .uri(&format!("/team/{}/edit", team.id))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("Bravo"));

    let req = test::TestRequest::post()
        .uri(&format!("/team/{}/edit", team.id))
        .cookie(cookie)
        .set_form([("team_name", "Charlie")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/teams");

    let renamed = h
        .pool
        .get_team(team.id)
        .await
        .expect("query team")
        .expect("team still exists");
    assert_eq!(renamed.name, "Charlie");
}

#[actix_rt::test]
async fn test_missing_team_edit_is_404() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    let req = test::TestRequest::get()
        .uri("/team/999/edit")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::post()
        .uri("/team/999/edit")
        .cookie(cookie)
        .set_form([("team_name", "Ghost")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let teams = h.pool.list_teams().await.expect("list teams");
    assert!(teams.is_empty());
}

#[actix_rt::test]
async fn test_zones_are_created_edited_and_listed() {
    let h = setup().await;
    let app = create_test_app(&h).await;
    let cookie = login_cookie(&app).await;

    for name in ["West", "East"] {
        let req = test::TestRequest::post()
            .uri("/zone/new")
            .cookie(cookie.clone())
            .set_form([("zone_name", name)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/zones");
    }

    let zones = h.pool.list_zones().await.expect("list zones");
    let names: Vec<_> = zones.iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["East", "West"]);

    let req = test::TestRequest::post()
        .uri(&format!("/zone/{}/edit", zones[1].id))
        .cookie(cookie.clone())
        .set_form([("zone_name", "North")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 303);
    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .map(|c| c.into_owned())
        .expect("Save should set a flash cookie");

    let req = test::TestRequest::get()
        .uri("/zones")
        .cookie(cookie.clone())
        .cookie(flash)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(html.contains("Zone was saved successfully!"));
    assert!(html.contains(">North<"));
    assert!(!html.contains(">West<"));

    let req = test::TestRequest::get()
        .uri("/zone/999/edit")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

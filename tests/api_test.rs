/// HTTP tests for the onboarding forms, dashboard actions and the JSON API,
/// run against the full app with cookie sessions.

use actix_web::{http::StatusCode, test};
use serde_json::Value;

mod common;
use common::{TEST_EMAIL, app, csrf_from, location, next_cookie, session_cookie, state};

/// Landing page, onboarding form and questionnaire. Evaluates to the
/// session cookie and CSRF token to use for later requests.
macro_rules! onboard {
    ($app:expr, $answers:expr) => {{
        let resp = test::call_service(&$app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = session_cookie(&resp).expect("landing sets a session cookie");
        let body = test::read_body(resp).await;
        let token = csrf_from(std::str::from_utf8(&body).unwrap()).expect("csrf token in form");

        let req = test::TestRequest::post()
            .uri("/onboard")
            .cookie(cookie.clone())
            .set_form([("email", TEST_EMAIL), ("linkedin_url", ""), ("csrf_token", token.as_str())])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp).as_deref(), Some("/questionnaire"));
        let cookie = next_cookie(&resp, cookie);

        let mut form: Vec<(&str, &str)> = vec![("csrf_token", token.as_str())];
        form.extend_from_slice($answers);
        let req = test::TestRequest::post()
            .uri("/questionnaire")
            .cookie(cookie.clone())
            .set_form(&form)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp).as_deref(), Some("/dashboard"));
        (next_cookie(&resp, cookie), token)
    }};
}

// ---------------------------------------------------------------------------
// System endpoints
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(app(state())).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_info_lists_endpoints() {
    let app = test::init_service(app(state())).await;
    let req = test::TestRequest::get().uri("/api/v1/info").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Fulcrum");
    assert!(body["endpoints"]["POST /api/v1/feed/skip"].is_string());
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_api_without_session_is_unauthorized() {
    let app = test::init_service(app(state())).await;
    let req = test::TestRequest::get().uri("/api/v1/feed").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_api_mutation_requires_json_content_type() {
    let app = test::init_service(app(state())).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/feed/skip")
        .set_form([("x", "1")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("application/json"));
}

#[actix_web::test]
async fn test_onboard_rejects_bad_csrf() {
    let app = test::init_service(app(state())).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::post()
        .uri("/onboard")
        .cookie(cookie)
        .set_form([("email", TEST_EMAIL), ("csrf_token", "forged")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_onboard_invalid_email_rerenders_form() {
    let app = test::init_service(app(state())).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let cookie = session_cookie(&resp).unwrap();
    let body = test::read_body(resp).await;
    let token = csrf_from(std::str::from_utf8(&body).unwrap()).unwrap();

    let req = test::TestRequest::post()
        .uri("/onboard")
        .cookie(cookie)
        .set_form([("email", "not-an-email"), ("csrf_token", token.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Email must be a valid address"));
}

#[actix_web::test]
async fn test_pages_redirect_without_session() {
    let app = test::init_service(app(state())).await;
    for uri in ["/dashboard", "/questionnaire"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp).as_deref(), Some("/"));
    }
}

// ---------------------------------------------------------------------------
// Full flow
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_dashboard_shows_first_card() {
    let app = test::init_service(app(state())).await;
    let (cookie, _) = onboard!(app, &[("drives_car", "on")]);

    let req = test::TestRequest::get().uri("/dashboard").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Reviewed 0 of 3"));
    assert!(html.contains("/stack/skip"));
    assert!(html.contains("parking, traffic"));
}

#[actix_web::test]
async fn test_json_feed_flow() {
    let app = test::init_service(app(state())).await;
    let (cookie, _) = onboard!(app, &[("drives_car", "on")]);

    let req = test::TestRequest::get().uri("/api/v1/feed").cookie(cookie.clone()).to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed["state"], "active");
    assert_eq!(feed["source"], "generated");
    assert_eq!(feed["total"], 3);
    assert_eq!(feed["current"]["id"], "parking-permit-reform");

    let req = test::TestRequest::post()
        .uri("/api/v1/feed/skip")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({}))
        .to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        feed["queue"],
        serde_json::json!(["voter-registration-check", "sponsored-tenant-rights-clinic", "parking-permit-reform"])
    );
    assert_eq!(feed["reviewed"][0]["decision"], "skipped");

    let req = test::TestRequest::post()
        .uri("/api/v1/feed/accept")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({}))
        .to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed["settled"], 2);

    let req = test::TestRequest::post()
        .uri("/api/v1/feed/reconsider/parking-permit-reform")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({}))
        .to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed["current"]["id"], "parking-permit-reform");
    assert_eq!(feed["queue"].as_array().unwrap().len(), 2);

    // Finish is refused while cards remain
    let req = test::TestRequest::post()
        .uri("/api/v1/feed/finish")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/api/v1/todos").cookie(cookie.clone()).to_request();
    let todos: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(todos["pending"], 1);
    assert_eq!(todos["items"][0]["id"], "voter-registration-check");

    let req = test::TestRequest::post()
        .uri("/api/v1/todos/voter-registration-check/toggle")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({}))
        .to_request();
    let toggled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(toggled["completed"], true);

    let req = test::TestRequest::get().uri("/api/v1/feed/stats").cookie(cookie).to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["sponsored"], 1);
}

#[actix_web::test]
async fn test_api_summary_and_finish() {
    let app = test::init_service(app(state())).await;
    let (cookie, _) = onboard!(app, &[]);

    let post = |uri: &str| {
        test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(serde_json::json!({}))
            .to_request()
    };

    let resp = test::call_service(&app, post("/api/v1/feed/summary")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let _ = test::call_service(&app, post("/api/v1/feed/skip")).await;
    let feed: Value = test::call_and_read_body_json(&app, post("/api/v1/feed/summary")).await;
    assert_eq!(feed["state"], "summary");

    let feed: Value = test::call_and_read_body_json(&app, post("/api/v1/feed/finish")).await;
    assert_eq!(feed["finished"], true);

    let resp = test::call_service(&app, post("/api/v1/feed/skip")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_api_profile_edit_regenerates_feed() {
    let app = test::init_service(app(state())).await;
    let (cookie, _) = onboard!(app, &[("drives_car", "on")]);

    let req = test::TestRequest::post()
        .uri("/api/v1/profile/edit")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({ "message": "I sold my car last spring" }))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["changed"], true);
    assert_eq!(outcome["feed_reset"], true);
    assert_eq!(outcome["patch"]["drivesCar"], false);

    let req = test::TestRequest::get().uri("/api/v1/feed").cookie(cookie.clone()).to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed["total"], 2);
    assert_eq!(feed["current"]["id"], "voter-registration-check");

    let req = test::TestRequest::post()
        .uri("/api/v1/profile/edit")
        .cookie(cookie)
        .set_json(serde_json::json!({ "message": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_form_actions_and_flash() {
    let app = test::init_service(app(state())).await;
    let (cookie, token) = onboard!(app, &[("uses_parks", "on")]);

    let req = test::TestRequest::post()
        .uri("/stack/skip")
        .cookie(cookie.clone())
        .set_form([("csrf_token", token.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/dashboard"));
    let cookie = next_cookie(&resp, cookie);

    // Finishing mid-review is refused with a flash message
    let req = test::TestRequest::post()
        .uri("/stack/finish")
        .cookie(cookie.clone())
        .set_form([("csrf_token", token.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = next_cookie(&resp, cookie);

    let req = test::TestRequest::get().uri("/dashboard").cookie(cookie.clone()).to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(html.contains("Review is still in progress"));
    assert!(html.contains("Reviewed 1 of 3"));

    let req = test::TestRequest::post()
        .uri("/stack/skip")
        .cookie(cookie)
        .set_form([("csrf_token", "forged")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_reonboarding_replaces_previous_session() {
    let st = state();
    let app = test::init_service(app(st.clone())).await;
    let (cookie, token) = onboard!(app, &[("drives_car", "on")]);
    assert_eq!(st.store.read().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri("/onboard")
        .cookie(cookie.clone())
        .set_form([("email", "second@example.org"), ("csrf_token", token.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = next_cookie(&resp, cookie);

    let store = st.store.read().unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.values().next().unwrap().email, "second@example.org");
    drop(store);

    // The new session has not answered the questionnaire yet
    let req = test::TestRequest::get().uri("/api/v1/feed").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[::core::prelude::v1::test]
fn test_csrf_token_found_with_loose_spacing() {
    let html = r#"<input type="hidden" name="csrf_token"   value="ab12">"#;
    assert_eq!(csrf_from(html).as_deref(), Some("ab12"));
    assert_eq!(csrf_from("<form></form>"), None);
}

//! Shared test infrastructure for the feed, stack and HTTP tests.
//!
//! - `attrs()` / `all_true()` build questionnaire answers
//! - `card()` builds a bare opportunity for stack tests
//! - `app()` builds the full HTTP app with cookie sessions
//! - `csrf_from()` / `session_cookie()` drive the form flow
#![allow(dead_code)]

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    App, Error,
    body::MessageBody,
    cookie::{Cookie, Key},
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};

use regex::Regex;

use fulcrum::config::AppConfig;
use fulcrum::handlers;
use fulcrum::models::{Category, Opportunity, Urgency, UserAttributes};
use fulcrum::state::AppState;

pub const TEST_EMAIL: &str = "resident@example.org";

/// Default cookie name used by actix-session.
const SESSION_COOKIE: &str = "id";

// ============================================================================
// MODEL FIXTURES
// ============================================================================

/// Answers with every question left unticked.
pub fn attrs() -> UserAttributes {
    UserAttributes::new(TEST_EMAIL)
}

pub fn all_true() -> UserAttributes {
    UserAttributes {
        email: TEST_EMAIL.to_string(),
        drives_car: true,
        uses_transit: true,
        bike_commutes: true,
        rents_home: true,
        owns_home: true,
        has_children: true,
        is_small_business_owner: true,
        concerned_about_safety: true,
        uses_parks: true,
    }
}

pub fn card(id: &str) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        category: Category::Action,
        urgency: Urgency::Soon,
        title: format!("Card {id}"),
        description: format!("Description of {id}"),
        impact: "Local".to_string(),
        location: None,
        date: None,
        cost_impact: None,
        recommended_action: None,
        sponsor: None,
    }
}

pub fn ids<'a>(items: impl IntoIterator<Item = &'a Opportunity>) -> Vec<String> {
    items.into_iter().map(|o| o.id.clone()).collect()
}

// ============================================================================
// HTTP APP
// ============================================================================

pub fn state() -> AppState {
    AppState::new(AppConfig::default())
}

/// The app as `main` assembles it, minus the request logger.
pub fn app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

    App::new()
        .wrap(session_mw)
        .app_data(web::Data::new(state))
        .configure(handlers::configure)
}

/// The session cookie set by a response, if the session changed.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

/// Keep the newest session cookie across a sequence of requests.
pub fn next_cookie<B>(resp: &ServiceResponse<B>, previous: Cookie<'static>) -> Cookie<'static> {
    session_cookie(resp).unwrap_or(previous)
}

/// Pull the CSRF token out of a rendered form.
pub fn csrf_from(html: &str) -> Option<String> {
    let re = Regex::new(r#"name="csrf_token"\s+value="([^"]+)""#).expect("Failed to compile regex");
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

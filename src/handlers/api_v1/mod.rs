pub mod feed;
pub mod profile;
pub mod todos;

use actix_session::Session;
use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header},
    middleware::Next,
};

use crate::errors::AppError;
use crate::handlers::system_handlers;
use crate::session::{self, FeedSession, cookie};
use crate::state::AppState;

fn is_json(req: &ServiceRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Feed, to-do and profile writes only accept JSON bodies. A cross-site
/// form post cannot set that content type, so the check takes the place
/// of the form CSRF token on these routes.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let writes = [Method::POST, Method::PUT, Method::DELETE].contains(req.method());
    if writes && !is_json(&req) {
        log::debug!("Rejected non-JSON {} {}", req.method(), req.path());
        let response = HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Send Content-Type: application/json" }));
        return Ok(req.into_response(response).map_into_right_body());
    }
    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Run `f` against the caller's feed session.
pub(crate) fn with_feed<T, F>(state: &AppState, session: &Session, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut FeedSession) -> Result<T, AppError>,
{
    let id = cookie::require_session_id(session)?;
    session::with_session(&state.store, &id, f)
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/info", web::get().to(system_handlers::info));
    cfg.service(
        web::scope("/feed")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(feed::show))
            .route("/stats", web::get().to(feed::stats))
            .route("/skip", web::post().to(feed::skip))
            .route("/accept", web::post().to(feed::accept))
            .route("/summary", web::post().to(feed::summary))
            .route("/finish", web::post().to(feed::finish))
            .route("/reconsider/{id}", web::post().to(feed::reconsider))
    );
    cfg.service(
        web::scope("/todos")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(todos::list))
            .route("/{id}/toggle", web::post().to(todos::toggle))
    );
    cfg.service(
        web::scope("/profile")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/edit", web::post().to(profile::edit))
    );
}

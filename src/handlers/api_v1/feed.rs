use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::session::FeedSession;
use crate::state::AppState;
use crate::templates_structs::FeedResponse;
use super::with_feed;

fn snapshot(s: &FeedSession) -> Result<FeedResponse, AppError> {
    FeedResponse::from_session(s)
        .ok_or_else(|| AppError::Validation("Complete the questionnaire first".to_string()))
}

/// Apply a stack operation and answer with the resulting snapshot.
fn respond<F>(state: &AppState, session: &Session, op: F) -> Result<HttpResponse, AppError>
where
    F: FnOnce(&mut FeedSession) -> Result<(), AppError>,
{
    let body = with_feed(state, session, |s| {
        op(s)?;
        snapshot(s)
    })?;
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/v1/feed
pub async fn show(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    respond(&state, &session, |_| Ok(()))
}

/// GET /api/v1/feed/stats
pub async fn stats(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let stats = with_feed(&state, &session, |s| Ok(s.stats()))?;
    Ok(HttpResponse::Ok().json(stats))
}

/// POST /api/v1/feed/skip
pub async fn skip(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    respond(&state, &session, |s| s.skip())
}

/// POST /api/v1/feed/accept
pub async fn accept(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    respond(&state, &session, |s| s.accept())
}

/// POST /api/v1/feed/summary
pub async fn summary(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    respond(&state, &session, |s| s.request_summary())
}

/// POST /api/v1/feed/finish
pub async fn finish(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    respond(&state, &session, |s| s.finish())
}

/// POST /api/v1/feed/reconsider/{id}
pub async fn reconsider(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    respond(&state, &session, |s| s.reconsider(&id))
}

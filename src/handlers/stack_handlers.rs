//! Form actions posted from the dashboard. Each redirects back to it.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::see_other;
use crate::session::{self, FeedSession, cookie};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct ProfileEditForm {
    pub csrf_token: String,
    pub message: String,
}

/// Validate the form, run `action` on the visitor's feed session and go
/// back to the dashboard. Contract violations become a flash message.
fn act<F>(
    state: &AppState,
    session: &Session,
    csrf_token: &str,
    action: F,
) -> Result<HttpResponse, AppError>
where
    F: FnOnce(&mut FeedSession) -> Result<(), AppError>,
{
    cookie::validate_csrf(session, csrf_token)?;
    let Some(id) = cookie::get_session_id(session) else {
        return Ok(see_other("/"));
    };
    match session::with_session(&state.store, &id, action) {
        Ok(()) => {}
        Err(e @ (AppError::Stack(_) | AppError::Validation(_) | AppError::NotFound)) => {
            log::debug!("Dashboard action rejected: {}", e);
            cookie::set_flash(session, &e.to_string());
        }
        Err(e) => return Err(e),
    }
    Ok(see_other("/dashboard"))
}

/// POST /stack/skip
pub async fn skip(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    act(&state, &session, &form.csrf_token, |s| s.skip())
}

/// POST /stack/accept
pub async fn accept(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    act(&state, &session, &form.csrf_token, |s| s.accept())
}

/// POST /stack/summary
pub async fn summary(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    act(&state, &session, &form.csrf_token, |s| s.request_summary())
}

/// POST /stack/finish
pub async fn finish(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    act(&state, &session, &form.csrf_token, |s| s.finish())
}

/// POST /stack/reconsider/{id}
pub async fn reconsider(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let opportunity_id = path.into_inner();
    act(&state, &session, &form.csrf_token, |s| s.reconsider(&opportunity_id))
}

/// POST /todos/{id}/toggle
pub async fn toggle_todo(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let todo_id = path.into_inner();
    act(&state, &session, &form.csrf_token, |s| s.todos.toggle(&todo_id).map(|_| ()))
}

/// POST /profile/edit
pub async fn edit_profile(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<ProfileEditForm>,
) -> Result<HttpResponse, AppError> {
    let policy = state.config.profile_edit_reset;
    act(&state, &session, &form.csrf_token, |s| {
        let outcome = s.edit_profile(&form.message, policy)?;
        let note = match (outcome.changed, outcome.feed_reset) {
            (false, _) => "No profile changes recognized",
            (true, true) => "Profile updated; your feed was refreshed",
            (true, false) => "Profile updated",
        };
        cookie::set_flash(&session, note);
        Ok(())
    })
}

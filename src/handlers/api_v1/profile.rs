use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::state::AppState;
use crate::templates_structs::ProfileEditRequest;
use super::with_feed;

/// POST /api/v1/profile/edit - interpret a free-text edit and apply it.
pub async fn edit(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<ProfileEditRequest>,
) -> Result<HttpResponse, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }
    let policy = state.config.profile_edit_reset;
    let outcome = with_feed(&state, &session, |s| s.edit_profile(&body.message, policy))?;
    Ok(HttpResponse::Ok().json(outcome))
}

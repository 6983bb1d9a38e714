use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::state::AppState;
use crate::templates_structs::{TodoListResponse, TodoToggleResponse};
use super::with_feed;

/// GET /api/v1/todos
pub async fn list(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let body = with_feed(&state, &session, |s| {
        Ok(TodoListResponse {
            items: s.todos.items().to_vec(),
            pending: s.todos.pending_count(),
        })
    })?;
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/v1/todos/{id}/toggle
pub async fn toggle(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let completed = with_feed(&state, &session, |s| s.todos.toggle(&id))?;
    Ok(HttpResponse::Ok().json(TodoToggleResponse { id, completed }))
}

use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::stack::StackError;

#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    Session(String),
    Csrf,
    Validation(String),
    Stack(StackError),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::Validation(e) => write!(f, "{e}"),
            AppError::Stack(e) => write!(f, "{e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = serde_json::json!({ "error": self.to_string() });
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(body),
            AppError::Csrf => HttpResponse::Forbidden().json(body),
            AppError::Validation(_) => HttpResponse::BadRequest().json(body),
            AppError::Stack(_) => HttpResponse::Conflict().json(body),
            AppError::Session(_) => {
                log::warn!("{self}");
                HttpResponse::Unauthorized().json(body)
            }
            AppError::Template(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<StackError> for AppError {
    fn from(e: StackError) -> Self {
        AppError::Stack(e)
    }
}

/// Render an askama template into an HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

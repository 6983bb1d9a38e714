pub mod api_v1;
pub mod dashboard;
pub mod onboard_handlers;
pub mod stack_handlers;
pub mod system_handlers;

use actix_web::{web, HttpResponse};

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Register every route. Session middleware and `AppState` are supplied by
/// the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Onboarding
        .route("/", web::get().to(onboard_handlers::landing))
        .route("/onboard", web::post().to(onboard_handlers::submit))
        .route("/questionnaire", web::get().to(onboard_handlers::questionnaire))
        .route("/questionnaire", web::post().to(onboard_handlers::questionnaire_submit))
        // Dashboard and card stack form actions
        .route("/dashboard", web::get().to(dashboard::index))
        .route("/stack/skip", web::post().to(stack_handlers::skip))
        .route("/stack/accept", web::post().to(stack_handlers::accept))
        .route("/stack/summary", web::post().to(stack_handlers::summary))
        .route("/stack/finish", web::post().to(stack_handlers::finish))
        .route("/stack/reconsider/{id}", web::post().to(stack_handlers::reconsider))
        .route("/todos/{id}/toggle", web::post().to(stack_handlers::toggle_todo))
        .route("/profile/edit", web::post().to(stack_handlers::edit_profile))
        // System
        .route("/health", web::get().to(system_handlers::health))
        .service(web::scope("/api/v1").configure(api_v1::configure));
}

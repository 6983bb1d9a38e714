use actix_web::HttpResponse;

use crate::templates_structs::APP_NAME;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

/// GET /api/v1/info - service name, version and endpoint map.
pub async fn info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "name": APP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Civic engagement feed matched to your lifestyle",
        "endpoints": {
            "GET /api/v1/feed": "Current card stack",
            "POST /api/v1/feed/skip": "Skip the current card",
            "POST /api/v1/feed/accept": "Accept the current card and add a to-do",
            "POST /api/v1/feed/summary": "Show the review summary",
            "POST /api/v1/feed/finish": "Finish the review",
            "POST /api/v1/feed/reconsider/{id}": "Bring a skipped card back",
            "GET /api/v1/feed/stats": "Counts by category and urgency",
            "GET /api/v1/todos": "To-do list",
            "POST /api/v1/todos/{id}/toggle": "Toggle a to-do",
            "POST /api/v1/profile/edit": "Update answers from free text",
        }
    }))
}

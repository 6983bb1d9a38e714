use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use fulcrum::config::AppConfig;
use fulcrum::handlers;
use fulcrum::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    // Session signing key; a generated key invalidates sessions on restart
    let secret_key = match config.session_key.as_deref() {
        Some(val) => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        None => Key::generate(),
    };

    match config.events_api_url.as_deref() {
        Some(url) => log::info!("Personalized events from {} (timeout {:?})", url, config.events_timeout),
        None => log::info!("No EVENTS_API_URL set; serving generated feeds only"),
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config);

    log::info!("Starting server at http://{}", bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}

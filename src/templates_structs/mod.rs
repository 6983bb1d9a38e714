// Template context structures for Askama templates and JSON API payloads.

use actix_session::Session;

use crate::session::cookie::{get_or_create_csrf, take_flash};

mod api;
mod dashboard;
mod onboard;

pub use api::*;
pub use dashboard::*;
pub use onboard::*;

pub const APP_NAME: &str = "Fulcrum";

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub app_name: String,
    pub csrf_token: String,
    pub flash: Option<String>,
    pub email: String,
}

impl PageContext {
    pub fn build(session: &Session, email: &str) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            csrf_token: get_or_create_csrf(session),
            flash: take_flash(session),
            email: email.to_string(),
        }
    }
}

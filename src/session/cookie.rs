//! Values kept in the signed session cookie: the feed session id, the CSRF
//! token and a one-shot flash message.

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const SESSION_ID_KEY: &str = "feed_session_id";
const CSRF_KEY: &str = "csrf_token";
const FLASH_KEY: &str = "flash";

/// Shared by feed session ids and CSRF tokens: 64 hex chars.
pub fn generate_token() -> String {
    hex::encode(rand::rng().random::<[u8; 32]>())
}

pub fn get_session_id(session: &Session) -> Option<String> {
    session.get::<String>(SESSION_ID_KEY).unwrap_or(None)
}

pub fn require_session_id(session: &Session) -> Result<String, AppError> {
    get_session_id(session).ok_or_else(|| AppError::Session("No feed session; start at /".to_string()))
}

/// Start a fresh feed session id, replacing any previous one.
pub fn start_session_id(session: &Session) -> Result<String, AppError> {
    let id = generate_token();
    session
        .insert(SESSION_ID_KEY, &id)
        .map_err(|e| AppError::Session(format!("Failed to store session id: {e}")))?;
    Ok(id)
}

/// The token embedded in every onboarding and dashboard form. One per
/// cookie session, minted on the first page render.
pub fn get_or_create_csrf(session: &Session) -> String {
    match session.get::<String>(CSRF_KEY) {
        Ok(Some(token)) => token,
        _ => {
            let token = generate_token();
            if let Err(e) = session.insert(CSRF_KEY, &token) {
                log::warn!("Could not store CSRF token: {e}");
            }
            token
        }
    }
}

/// Form posts must echo the session's token.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    match session.get::<String>(CSRF_KEY) {
        Ok(Some(stored)) if tokens_match(&stored, submitted) => Ok(()),
        _ => Err(AppError::Csrf),
    }
}

/// Compares every byte so timing does not leak the matching prefix.
fn tokens_match(stored: &str, submitted: &str) -> bool {
    if stored.is_empty() || stored.len() != submitted.len() {
        return false;
    }
    let diff = stored
        .bytes()
        .zip(submitted.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    diff == 0
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

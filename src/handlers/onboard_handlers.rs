use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::models::UserAttributes;
use crate::session::{self, FeedSession, cookie};
use crate::state::AppState;
use crate::templates_structs::{OnboardTemplate, PageContext, QuestionView, QuestionnaireTemplate};

#[derive(Deserialize)]
pub struct OnboardForm {
    pub email: String,
    #[serde(default)]
    pub linkedin_url: String,
    pub csrf_token: String,
}

/// Checkbox fields are only sent when ticked.
#[derive(Deserialize)]
pub struct QuestionnaireForm {
    pub csrf_token: String,
    #[serde(default)]
    pub drives_car: Option<String>,
    #[serde(default)]
    pub uses_transit: Option<String>,
    #[serde(default)]
    pub bike_commutes: Option<String>,
    #[serde(default)]
    pub rents_home: Option<String>,
    #[serde(default)]
    pub owns_home: Option<String>,
    #[serde(default)]
    pub has_children: Option<String>,
    #[serde(default)]
    pub is_small_business_owner: Option<String>,
    #[serde(default)]
    pub concerned_about_safety: Option<String>,
    #[serde(default)]
    pub uses_parks: Option<String>,
}

impl QuestionnaireForm {
    pub fn attributes(&self, email: &str) -> UserAttributes {
        UserAttributes {
            email: email.to_string(),
            drives_car: self.drives_car.is_some(),
            uses_transit: self.uses_transit.is_some(),
            bike_commutes: self.bike_commutes.is_some(),
            rents_home: self.rents_home.is_some(),
            owns_home: self.owns_home.is_some(),
            has_children: self.has_children.is_some(),
            is_small_business_owner: self.is_small_business_owner.is_some(),
            concerned_about_safety: self.concerned_about_safety.is_some(),
            uses_parks: self.uses_parks.is_some(),
        }
    }
}

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => None,
        _ => Some("Email must be a valid address".to_string()),
    }
}

/// Validate an optional LinkedIn profile URL (empty is OK).
pub fn validate_linkedin(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.contains("linkedin.com/") {
        return Some("LinkedIn URL must point to linkedin.com".to_string());
    }
    None
}

fn questions(attrs: Option<&UserAttributes>) -> Vec<QuestionView> {
    let a = attrs.cloned().unwrap_or_default();
    vec![
        QuestionView { name: "drives_car", prompt: "I drive a car in the city", checked: a.drives_car },
        QuestionView { name: "uses_transit", prompt: "I ride Muni or BART", checked: a.uses_transit },
        QuestionView { name: "bike_commutes", prompt: "I commute by bike", checked: a.bike_commutes },
        QuestionView { name: "rents_home", prompt: "I rent my home", checked: a.rents_home },
        QuestionView { name: "owns_home", prompt: "I own my home", checked: a.owns_home },
        QuestionView { name: "has_children", prompt: "I have school-age children", checked: a.has_children },
        QuestionView {
            name: "is_small_business_owner",
            prompt: "I run a small business",
            checked: a.is_small_business_owner,
        },
        QuestionView {
            name: "concerned_about_safety",
            prompt: "Neighborhood safety is a concern for me",
            checked: a.concerned_about_safety,
        },
        QuestionView { name: "uses_parks", prompt: "I use city parks regularly", checked: a.uses_parks },
    ]
}

/// GET /
pub async fn landing(session: Session) -> Result<HttpResponse, AppError> {
    let tmpl = OnboardTemplate {
        ctx: PageContext::build(&session, ""),
        errors: vec![],
        email: String::new(),
        linkedin_url: String::new(),
    };
    render(tmpl)
}

/// POST /onboard
pub async fn submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<OnboardForm>,
) -> Result<HttpResponse, AppError> {
    cookie::validate_csrf(&session, &form.csrf_token)?;

    let mut errors: Vec<String> = vec![];
    errors.extend(validate_email(&form.email));
    errors.extend(validate_linkedin(&form.linkedin_url));

    if !errors.is_empty() {
        let tmpl = OnboardTemplate {
            ctx: PageContext::build(&session, ""),
            errors,
            email: form.email.clone(),
            linkedin_url: form.linkedin_url.clone(),
        };
        return render(tmpl);
    }

    let linkedin = Some(form.linkedin_url.trim().to_string()).filter(|u| !u.is_empty());
    if let Some(previous) = cookie::get_session_id(&session) {
        session::remove(&state.store, &previous);
    }
    session::evict_older_than(&state.store, state.config.session_ttl, Utc::now());
    let id = cookie::start_session_id(&session)?;
    session::insert(&state.store, &id, FeedSession::new(&form.email, linkedin));
    log::info!("Onboarded {}", form.email.trim());

    Ok(see_other("/questionnaire"))
}

/// GET /questionnaire
pub async fn questionnaire(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let Some(feed) = cookie::get_session_id(&session).and_then(|id| session::snapshot(&state.store, &id)) else {
        return Ok(see_other("/"));
    };
    let tmpl = QuestionnaireTemplate {
        ctx: PageContext::build(&session, &feed.email),
        questions: questions(feed.attributes.as_ref()),
    };
    render(tmpl)
}

/// POST /questionnaire - build the feed, then try the events API in the
/// background.
pub async fn questionnaire_submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<QuestionnaireForm>,
) -> Result<HttpResponse, AppError> {
    cookie::validate_csrf(&session, &form.csrf_token)?;
    let Some(id) = cookie::get_session_id(&session) else {
        return Ok(see_other("/"));
    };

    let (attrs, generation) = session::with_session(&state.store, &id, |s| {
        s.start_feed(form.attributes(&s.email))?;
        Ok((s.attributes.clone().unwrap_or_default(), s.generation))
    })?;

    if let Some(client) = state.events.clone() {
        let store = state.store.clone();
        let policy = state.config.remote_reset;
        actix_web::rt::spawn(async move {
            if let Err(e) = session::refresh_from_remote(&store, &id, &client, &attrs, generation, policy).await {
                log::error!("Applying remote feed failed: {}", e);
            }
        });
    }

    Ok(see_other("/dashboard"))
}

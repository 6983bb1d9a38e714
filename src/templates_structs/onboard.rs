use askama::Template;

use super::PageContext;

#[derive(Template)]
#[template(path = "onboard.html")]
pub struct OnboardTemplate {
    pub ctx: PageContext,
    pub errors: Vec<String>,
    pub email: String,
    pub linkedin_url: String,
}

/// One yes/no question on the questionnaire.
pub struct QuestionView {
    pub name: &'static str,
    pub prompt: &'static str,
    pub checked: bool,
}

#[derive(Template)]
#[template(path = "questionnaire.html")]
pub struct QuestionnaireTemplate {
    pub ctx: PageContext,
    pub questions: Vec<QuestionView>,
}

use askama::Template;

use crate::models::{Decision, Opportunity, ReviewedEntry, TodoItem};
use super::PageContext;

/// A card as shown on the dashboard.
pub struct CardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub category: &'static str,
    pub urgency: &'static str,
    pub location: Option<String>,
    pub date: Option<String>,
    pub cost_impact: Option<String>,
    pub action: String,
    pub sponsor: Option<String>,
}

impl From<&Opportunity> for CardView {
    fn from(o: &Opportunity) -> Self {
        CardView {
            id: o.id.clone(),
            title: o.title.clone(),
            description: o.description.clone(),
            impact: o.impact.clone(),
            category: o.category.label(),
            urgency: o.urgency.label(),
            location: o.location.clone(),
            date: o.date.clone(),
            cost_impact: o.cost_impact.clone(),
            action: o.action_text(),
            sponsor: o.sponsor.clone(),
        }
    }
}

pub struct ReviewView {
    pub id: String,
    pub title: String,
    pub skipped: bool,
}

impl From<&ReviewedEntry> for ReviewView {
    fn from(e: &ReviewedEntry) -> Self {
        ReviewView {
            id: e.opportunity.id.clone(),
            title: e.opportunity.title.clone(),
            skipped: e.decision == Decision::Skipped,
        }
    }
}

pub struct TodoView {
    pub id: String,
    pub action: String,
    pub location: Option<String>,
    pub date: Option<String>,
    pub completed: bool,
    pub category: &'static str,
}

impl From<&TodoItem> for TodoView {
    fn from(t: &TodoItem) -> Self {
        TodoView {
            id: t.id.clone(),
            action: t.action.clone(),
            location: t.location.clone(),
            date: t.date.clone(),
            completed: t.completed,
            category: t.category.label(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub explanation: String,
    pub live_data: bool,
    pub current: Option<CardView>,
    pub show_summary: bool,
    pub is_empty: bool,
    pub finished: bool,
    pub settled: usize,
    pub total: usize,
    pub remaining: usize,
    pub reviewed: Vec<ReviewView>,
    pub todos: Vec<TodoView>,
    pub pending_todos: usize,
}

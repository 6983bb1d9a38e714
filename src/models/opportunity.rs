use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Vote,
    Meeting,
    Action,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Vote => "Vote",
            Category::Meeting => "Meeting",
            Category::Action => "Action",
        }
    }

    /// Verb used when an opportunity has no recommended action of its own.
    fn fallback_verb(&self) -> &'static str {
        match self {
            Category::Vote => "Vote on:",
            Category::Meeting => "Attend:",
            Category::Action => "Take action:",
        }
    }
}

/// Ordered most pressing first, so sorting by urgency puts `Urgent` on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    Soon,
    Upcoming,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Urgent => "Urgent",
            Urgency::Soon => "Soon",
            Urgency::Upcoming => "Upcoming",
        }
    }
}

/// One civic action card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub category: Category,
    pub urgency: Urgency,
    pub title: String,
    pub description: String,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
}

impl Opportunity {
    pub fn is_sponsored(&self) -> bool {
        self.sponsor.is_some()
    }

    /// The to-do text for this card: its recommended action, or a phrase
    /// built from the category and title.
    pub fn action_text(&self) -> String {
        match self.recommended_action.as_deref().map(str::trim) {
            Some(action) if !action.is_empty() => action.to_string(),
            _ => format!("{} {}", self.category.fallback_verb(), self.title),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedEntry {
    pub opportunity: Opportunity,
    pub decision: Decision,
}

/// A to-do derived from an accepted opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub completed: bool,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl From<&Opportunity> for TodoItem {
    fn from(o: &Opportunity) -> Self {
        TodoItem {
            id: o.id.clone(),
            action: o.action_text(),
            location: o.location.clone(),
            date: o.date.clone(),
            completed: false,
            category: o.category,
            created_at: Utc::now(),
        }
    }
}

/// Counts over a feed, keyed by display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub total: usize,
    pub sponsored: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_urgency: BTreeMap<String, usize>,
}

impl FeedStats {
    pub fn from_opportunities<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Opportunity>,
    {
        let mut stats = FeedStats::default();
        for o in items {
            stats.total += 1;
            if o.is_sponsored() {
                stats.sponsored += 1;
            }
            *stats.by_category.entry(o.category.label().to_string()).or_default() += 1;
            *stats.by_urgency.entry(o.urgency.label().to_string()).or_default() += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(category: Category, action: Option<&str>) -> Opportunity {
        Opportunity {
            id: "x".into(),
            category,
            urgency: Urgency::Soon,
            title: "Board of Supervisors budget".into(),
            description: String::new(),
            impact: String::new(),
            location: Some("City Hall".into()),
            date: None,
            cost_impact: None,
            recommended_action: action.map(String::from),
            sponsor: None,
        }
    }

    #[test]
    fn action_text_prefers_recommended_action() {
        let o = card(Category::Meeting, Some("Submit public comment"));
        assert_eq!(o.action_text(), "Submit public comment");
    }

    #[test]
    fn action_text_falls_back_per_category() {
        assert_eq!(card(Category::Vote, None).action_text(), "Vote on: Board of Supervisors budget");
        assert_eq!(card(Category::Meeting, None).action_text(), "Attend: Board of Supervisors budget");
        assert_eq!(card(Category::Action, Some("  ")).action_text(), "Take action: Board of Supervisors budget");
    }

    #[test]
    fn todo_copies_id_and_location() {
        let todo = TodoItem::from(&card(Category::Meeting, None));
        assert_eq!(todo.id, "x");
        assert_eq!(todo.location.as_deref(), Some("City Hall"));
        assert!(!todo.completed);
        assert_eq!(todo.category, Category::Meeting);
    }

    #[test]
    fn urgency_orders_urgent_first() {
        let mut v = vec![Urgency::Upcoming, Urgency::Urgent, Urgency::Soon];
        v.sort();
        assert_eq!(v, vec![Urgency::Urgent, Urgency::Soon, Urgency::Upcoming]);
    }

    #[test]
    fn stats_count_by_label() {
        let items = vec![card(Category::Vote, None), card(Category::Vote, None), card(Category::Action, None)];
        let stats = FeedStats::from_opportunities(&items);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_category["Vote"], 2);
        assert_eq!(stats.by_category["Action"], 1);
        assert_eq!(stats.by_urgency["Soon"], 3);
        assert_eq!(stats.sponsored, 0);
    }
}

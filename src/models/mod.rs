pub mod attributes;
pub mod opportunity;

pub use attributes::{AttributePatch, UserAttributes};
pub use opportunity::{Category, Decision, FeedStats, Opportunity, ReviewedEntry, TodoItem, Urgency};

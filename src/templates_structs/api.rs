use serde::{Deserialize, Serialize};

use crate::feed::FeedSource;
use crate::models::{Opportunity, ReviewedEntry, TodoItem};
use crate::session::FeedSession;
use crate::stack::StackState;

/// Card stack snapshot returned by the feed endpoints.
#[derive(Serialize, Debug, Clone)]
pub struct FeedResponse {
    pub state: StackState,
    pub source: FeedSource,
    pub finished: bool,
    pub current: Option<Opportunity>,
    pub queue: Vec<String>,
    pub reviewed: Vec<ReviewedEntry>,
    pub settled: usize,
    pub total: usize,
    pub explanation: String,
}

impl FeedResponse {
    /// `None` until the questionnaire has been answered.
    pub fn from_session(s: &FeedSession) -> Option<Self> {
        let stack = s.stack.as_ref()?;
        Some(FeedResponse {
            state: stack.state(),
            source: s.source,
            finished: stack.is_finished(),
            current: stack.current().cloned(),
            queue: stack.queue().map(|o| o.id.clone()).collect(),
            reviewed: stack.reviewed().to_vec(),
            settled: stack.settled(),
            total: stack.total(),
            explanation: s
                .attributes
                .as_ref()
                .map(|a| a.match_explanation())
                .unwrap_or_default(),
        })
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TodoListResponse {
    pub items: Vec<TodoItem>,
    pub pending: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct TodoToggleResponse {
    pub id: String,
    pub completed: bool,
}

#[derive(Deserialize, Debug)]
pub struct ProfileEditRequest {
    pub message: String,
}

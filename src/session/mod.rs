pub mod cookie;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::ResetPolicy;
use crate::errors::AppError;
use crate::feed::remote::{self, EventsClient};
use crate::feed::{self, FeedSource};
use crate::models::{AttributePatch, FeedStats, Opportunity, ReviewedEntry, UserAttributes};
use crate::stack::{CardStack, StackError};
use crate::todo::TodoList;

/// Everything one visitor has done so far.
#[derive(Debug, Clone)]
pub struct FeedSession {
    pub email: String,
    pub linkedin_url: Option<String>,
    pub attributes: Option<UserAttributes>,
    pub stack: Option<CardStack>,
    pub source: FeedSource,
    pub todos: TodoList,
    /// Final review list, set once the stack is finished.
    pub completed: Option<Vec<ReviewedEntry>>,
    /// Bumped whenever the answers change, so a fetch started from older
    /// answers can tell it is stale.
    pub generation: u64,
    pub created_at: DateTime<Utc>,
}

/// What a profile edit did.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileEditOutcome {
    pub patch: AttributePatch,
    pub changed: bool,
    pub feed_reset: bool,
}

impl FeedSession {
    pub fn new(email: &str, linkedin_url: Option<String>) -> Self {
        Self {
            email: email.trim().to_string(),
            linkedin_url,
            attributes: None,
            stack: None,
            source: FeedSource::Generated,
            todos: TodoList::new(),
            completed: None,
            generation: 0,
            created_at: Utc::now(),
        }
    }

    /// Store questionnaire answers and build the generated feed.
    pub fn start_feed(&mut self, mut attrs: UserAttributes) -> Result<(), AppError> {
        attrs.email = self.email.clone();
        let stack = CardStack::new(feed::generate(&attrs))?;
        self.attributes = Some(attrs);
        self.stack = Some(stack);
        self.source = FeedSource::Generated;
        self.completed = None;
        self.generation += 1;
        Ok(())
    }

    pub fn stack(&self) -> Result<&CardStack, AppError> {
        self.stack
            .as_ref()
            .ok_or_else(|| AppError::Validation("Complete the questionnaire first".to_string()))
    }

    pub fn stack_mut(&mut self) -> Result<&mut CardStack, AppError> {
        self.stack
            .as_mut()
            .ok_or_else(|| AppError::Validation("Complete the questionnaire first".to_string()))
    }

    fn can_reset(&self, policy: ResetPolicy) -> bool {
        match &self.stack {
            None => true,
            Some(s) if s.is_finished() => false,
            Some(s) => policy.allows(s.is_untouched()),
        }
    }

    /// Swap in a newer feed if the policy allows it. Returns whether the
    /// stack was replaced.
    pub fn replace_feed(
        &mut self,
        items: Vec<Opportunity>,
        source: FeedSource,
        policy: ResetPolicy,
    ) -> Result<bool, StackError> {
        if !self.can_reset(policy) {
            log::info!("Keeping current feed for {} ({:?})", self.email, policy);
            return Ok(false);
        }
        self.stack = Some(CardStack::new(items)?);
        self.source = source;
        log::info!("Replaced feed for {} ({:?})", self.email, source);
        Ok(true)
    }

    pub fn skip(&mut self) -> Result<(), AppError> {
        self.stack_mut()?.skip()?;
        Ok(())
    }

    pub fn accept(&mut self) -> Result<(), AppError> {
        let accepted = self.stack_mut()?.accept()?;
        self.todos.add(accepted.todo);
        if let Some(review) = accepted.completed {
            log::info!("Stack complete for {}: {} reviewed", self.email, review.len());
        }
        Ok(())
    }

    pub fn request_summary(&mut self) -> Result<(), AppError> {
        self.stack_mut()?.request_summary()?;
        Ok(())
    }

    pub fn reconsider(&mut self, id: &str) -> Result<(), AppError> {
        self.stack_mut()?.reconsider(id)?;
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if let Some(review) = self.stack_mut()?.finish()? {
            log::info!("Review finished for {}: {} entries", self.email, review.len());
            self.completed = Some(review);
        }
        Ok(())
    }

    /// Apply a free-text profile edit, regenerating the feed when the answers
    /// changed and the policy allows it.
    pub fn edit_profile(&mut self, message: &str, policy: ResetPolicy) -> Result<ProfileEditOutcome, AppError> {
        let patch = crate::profile_edit::classify(message);
        let attrs = self
            .attributes
            .as_mut()
            .ok_or_else(|| AppError::Validation("Complete the questionnaire first".to_string()))?;
        let changed = attrs.apply(&patch);
        let mut feed_reset = false;
        if changed {
            let items = feed::generate(attrs);
            self.generation += 1;
            feed_reset = self.replace_feed(items, FeedSource::Generated, policy)?;
        }
        Ok(ProfileEditOutcome { patch, changed, feed_reset })
    }

    /// Counts over every card in the current feed, decided or not.
    pub fn stats(&self) -> FeedStats {
        let Some(stack) = &self.stack else {
            return FeedStats::default();
        };
        let mut seen = HashSet::new();
        let cards = stack
            .queue()
            .chain(stack.reviewed().iter().map(|e| &e.opportunity))
            .filter(|o| seen.insert(o.id.as_str()));
        FeedStats::from_opportunities(cards)
    }
}

/// In-memory sessions keyed by session id.
pub type FeedStore = Arc<RwLock<HashMap<String, FeedSession>>>;

pub fn new_store() -> FeedStore {
    Arc::new(RwLock::new(HashMap::new()))
}

pub fn insert(store: &FeedStore, id: &str, session: FeedSession) {
    let mut map = store.write().unwrap_or_else(|e| e.into_inner());
    map.insert(id.to_string(), session);
}

pub fn remove(store: &FeedStore, id: &str) -> Option<FeedSession> {
    let mut map = store.write().unwrap_or_else(|e| e.into_inner());
    map.remove(id)
}

/// Drop sessions created before `now - max_age`. Returns how many went.
pub fn evict_older_than(store: &FeedStore, max_age: Duration, now: DateTime<Utc>) -> usize {
    let cutoff = now - max_age;
    let mut map = store.write().unwrap_or_else(|e| e.into_inner());
    let before = map.len();
    map.retain(|_, s| s.created_at >= cutoff);
    let evicted = before - map.len();
    if evicted > 0 {
        log::info!("Evicted {} expired feed sessions", evicted);
    }
    evicted
}

/// Run `f` against a session under the write lock.
pub fn with_session<T, F>(store: &FeedStore, id: &str, f: F) -> Result<T, AppError>
where
    F: FnOnce(&mut FeedSession) -> Result<T, AppError>,
{
    let mut map = store.write().unwrap_or_else(|e| e.into_inner());
    let session = map
        .get_mut(id)
        .ok_or_else(|| AppError::Session("Unknown or expired session".to_string()))?;
    f(session)
}

/// Read-only snapshot of a session.
pub fn snapshot(store: &FeedStore, id: &str) -> Option<FeedSession> {
    let map = store.read().unwrap_or_else(|e| e.into_inner());
    map.get(id).cloned()
}

/// Fetch the personalized feed and swap it into the session when the
/// policy allows. `generation` is the session's generation when `attrs`
/// was read; a result for older answers is discarded. Returns whether the
/// session's stack was replaced. The store lock is only taken after the
/// fetch resolves.
pub async fn refresh_from_remote(
    store: &FeedStore,
    id: &str,
    client: &EventsClient,
    attrs: &UserAttributes,
    generation: u64,
    policy: ResetPolicy,
) -> Result<bool, AppError> {
    let (items, source) = remote::load_feed(client, attrs).await;
    if source != FeedSource::Remote {
        return Ok(false);
    }
    with_session(store, id, |s| {
        if s.generation != generation {
            log::info!(
                "Discarding remote feed for {}: answers changed (generation {} -> {})",
                s.email,
                generation,
                s.generation
            );
            return Ok(false);
        }
        Ok(s.replace_feed(items, source, policy)?)
    })
}

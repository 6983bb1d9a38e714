//! The card stack: one opportunity shown at a time, accept or skip it, and
//! reopen skipped cards later.
//!
//! The queue holds every card not yet accepted. Skipped cards rotate to the
//! back and also get a `Skipped` review entry, so they remain recoverable.
//! Accepted cards leave the queue for good.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::Serialize;

use crate::models::{Decision, Opportunity, ReviewedEntry, TodoItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackState {
    Active,
    Summary,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    DuplicateId(String),
    EmptyQueue,
    NothingReviewed,
    UnknownId(String),
    NotSkipped(String),
    NotInSummary,
    Finished,
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::DuplicateId(id) => write!(f, "Duplicate opportunity id: {id}"),
            StackError::EmptyQueue => write!(f, "No opportunities left to review"),
            StackError::NothingReviewed => write!(f, "Nothing has been reviewed yet"),
            StackError::UnknownId(id) => write!(f, "Opportunity {id} has not been reviewed"),
            StackError::NotSkipped(id) => write!(f, "Opportunity {id} was accepted, not skipped"),
            StackError::NotInSummary => write!(f, "Review is still in progress"),
            StackError::Finished => write!(f, "Review session is already finished"),
        }
    }
}

impl std::error::Error for StackError {}

/// Result of accepting the front card.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub todo: TodoItem,
    /// The full review list, present when this accept emptied the queue.
    pub completed: Option<Vec<ReviewedEntry>>,
}

#[derive(Debug, Clone)]
pub struct CardStack {
    queue: VecDeque<Opportunity>,
    reviewed: Vec<ReviewedEntry>,
    summary_shown: bool,
    total: usize,
    reopened: HashSet<String>,
    touched: bool,
    finished: bool,
}

impl CardStack {
    pub fn new(opportunities: Vec<Opportunity>) -> Result<Self, StackError> {
        let mut seen = HashSet::with_capacity(opportunities.len());
        for o in &opportunities {
            if !seen.insert(o.id.as_str()) {
                return Err(StackError::DuplicateId(o.id.clone()));
            }
        }
        Ok(Self {
            total: opportunities.len(),
            queue: opportunities.into(),
            reviewed: Vec::new(),
            summary_shown: false,
            reopened: HashSet::new(),
            touched: false,
            finished: false,
        })
    }

    pub fn current(&self) -> Option<&Opportunity> {
        self.queue.front()
    }

    pub fn queue(&self) -> impl Iterator<Item = &Opportunity> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn reviewed(&self) -> &[ReviewedEntry] {
        &self.reviewed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True until the first accept or skip.
    pub fn is_untouched(&self) -> bool {
        !self.touched
    }

    pub fn state(&self) -> StackState {
        if self.summary_shown {
            StackState::Summary
        } else if self.queue.is_empty() && self.reviewed.is_empty() {
            StackState::Empty
        } else if self.queue.is_empty() {
            StackState::Summary
        } else {
            StackState::Active
        }
    }

    /// Cards with a standing decision, excluding ones reopened by reconsider.
    pub fn settled(&self) -> usize {
        self.reviewed
            .iter()
            .filter(|e| !self.reopened.contains(&e.opportunity.id))
            .count()
    }

    pub fn decided(&self, decision: Decision) -> impl Iterator<Item = &Opportunity> {
        self.reviewed
            .iter()
            .filter(move |e| e.decision == decision)
            .map(|e| &e.opportunity)
    }

    fn entry_position(&self, id: &str) -> Option<usize> {
        self.reviewed.iter().position(|e| e.opportunity.id == id)
    }

    fn ensure_open(&self) -> Result<(), StackError> {
        if self.finished {
            Err(StackError::Finished)
        } else {
            Ok(())
        }
    }

    /// Rotate the front card to the back and record it as skipped once.
    pub fn skip(&mut self) -> Result<StackState, StackError> {
        self.ensure_open()?;
        let cur = self.queue.pop_front().ok_or(StackError::EmptyQueue)?;
        self.touched = true;
        self.reopened.remove(&cur.id);
        if self.entry_position(&cur.id).is_none() {
            self.reviewed.push(ReviewedEntry {
                opportunity: cur.clone(),
                decision: Decision::Skipped,
            });
        }
        self.queue.push_back(cur);

        // Skips never shrink the queue, so exhaustion is counted on reviews.
        if self.settled() == self.total {
            self.summary_shown = true;
        }
        Ok(self.state())
    }

    /// Remove the front card for good and record it as accepted, replacing
    /// any earlier skip record.
    pub fn accept(&mut self) -> Result<Accepted, StackError> {
        self.ensure_open()?;
        let cur = self.queue.pop_front().ok_or(StackError::EmptyQueue)?;
        self.touched = true;
        self.reopened.remove(&cur.id);
        if let Some(pos) = self.entry_position(&cur.id) {
            self.reviewed.remove(pos);
        }
        let todo = TodoItem::from(&cur);
        self.reviewed.push(ReviewedEntry {
            opportunity: cur,
            decision: Decision::Accepted,
        });

        let completed = if self.queue.is_empty() {
            self.summary_shown = true;
            Some(self.reviewed.clone())
        } else {
            None
        };
        Ok(Accepted { todo, completed })
    }

    pub fn request_summary(&mut self) -> Result<(), StackError> {
        self.ensure_open()?;
        if self.reviewed.is_empty() {
            return Err(StackError::NothingReviewed);
        }
        self.summary_shown = true;
        Ok(())
    }

    /// Bring a skipped card back to the front of the queue. The review entry
    /// stays until the card is accepted or skipped again.
    pub fn reconsider(&mut self, id: &str) -> Result<(), StackError> {
        self.ensure_open()?;
        let pos = self
            .entry_position(id)
            .ok_or_else(|| StackError::UnknownId(id.to_string()))?;
        let entry = &self.reviewed[pos];
        if entry.decision != Decision::Skipped {
            return Err(StackError::NotSkipped(id.to_string()));
        }

        let queued = self.queue.iter().position(|o| o.id == id);
        let card = queued
            .and_then(|qpos| self.queue.remove(qpos))
            .unwrap_or_else(|| entry.opportunity.clone());
        self.queue.push_front(card);

        self.reopened.insert(id.to_string());
        self.summary_shown = false;
        Ok(())
    }

    /// Close the session. Returns the review list on the first call only.
    pub fn finish(&mut self) -> Result<Option<Vec<ReviewedEntry>>, StackError> {
        if self.finished {
            return Ok(None);
        }
        if self.state() == StackState::Active {
            return Err(StackError::NotInSummary);
        }
        self.finished = true;
        Ok(Some(self.reviewed.clone()))
    }
}

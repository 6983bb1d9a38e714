use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::models::{Category, Opportunity, Urgency, UserAttributes};
use super::FeedSource;

const VOTE_KEYWORDS: &[&str] = &["vote", "election", "ballot"];
const MEETING_KEYWORDS: &[&str] = &["meeting", "hearing", "board"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum RemoteUrgency {
    High,
    #[default]
    Medium,
    Low,
}

impl From<RemoteUrgency> for Urgency {
    fn from(u: RemoteUrgency) -> Self {
        match u {
            RemoteUrgency::High => Urgency::Urgent,
            RemoteUrgency::Medium => Urgency::Soon,
            RemoteUrgency::Low => Urgency::Upcoming,
        }
    }
}

/// A civic event as served by the events API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub impact_tags: Vec<String>,
    #[serde(default)]
    pub urgency: RemoteUrgency,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
}

/// Vote keywords win over meeting keywords regardless of tag order.
pub fn infer_category(tags: &[String]) -> Category {
    let lowered: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let mentions = |keywords: &[&str]| {
        lowered.iter().any(|t| keywords.iter().any(|k| t.contains(k)))
    };
    if mentions(VOTE_KEYWORDS) {
        Category::Vote
    } else if mentions(MEETING_KEYWORDS) {
        Category::Meeting
    } else {
        Category::Action
    }
}

impl RemoteEvent {
    pub fn into_opportunity(self) -> Opportunity {
        let category = infer_category(&self.impact_tags);
        let impact = if self.impact_tags.is_empty() {
            "May affect your neighborhood.".to_string()
        } else {
            format!("Affects: {}", self.impact_tags.join(", "))
        };
        Opportunity {
            id: self.id,
            category,
            urgency: self.urgency.into(),
            title: self.title,
            description: self.summary.unwrap_or_default(),
            impact,
            location: self.location,
            date: self.event_date,
            cost_impact: None,
            recommended_action: None,
            sponsor: None,
        }
    }
}

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Status(u16),
    Timeout,
    Decode(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "Request failed: {e}"),
            FetchError::Status(code) => write!(f, "Events API returned status {code}"),
            FetchError::Timeout => write!(f, "Events API timed out"),
            FetchError::Decode(e) => write!(f, "Could not decode events: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Client for the personalized events endpoint. One attempt per call.
#[derive(Clone)]
pub struct EventsClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl EventsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("fulcrum/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    pub async fn fetch_events(&self, tags: &[&str]) -> Result<Vec<RemoteEvent>, FetchError> {
        let request = self
            .client
            .get(self.events_url())
            .query(&[("tags", tags.join(","))])
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        tokio::time::timeout(self.timeout, response.json::<Vec<RemoteEvent>>())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Decode)
    }
}

/// Fetch the personalized feed, falling back to the generated one on any
/// failure or an empty result. Failures are logged, never returned.
pub async fn load_feed(client: &EventsClient, attrs: &UserAttributes) -> (Vec<Opportunity>, FeedSource) {
    let tags = attrs.interest_tags();
    match client.fetch_events(&tags).await {
        Ok(events) if !events.is_empty() => {
            log::info!("Loaded {} remote events for {}", events.len(), attrs.email);
            (super::from_remote(events, attrs), FeedSource::Remote)
        }
        Ok(_) => {
            log::info!("Events API returned no events for {}; using generated feed", attrs.email);
            (super::generate(attrs), FeedSource::Generated)
        }
        Err(e) => {
            log::warn!("Falling back to generated feed for {}: {}", attrs.email, e);
            (super::generate(attrs), FeedSource::Generated)
        }
    }
}

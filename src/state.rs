use crate::config::AppConfig;
use crate::feed::remote::EventsClient;
use crate::session::{self, FeedStore};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: FeedStore,
    pub config: AppConfig,
    /// Absent when no events API is configured; the generated feed is used.
    pub events: Option<EventsClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let events = config
            .events_api_url
            .as_deref()
            .map(|url| EventsClient::new(url, config.events_timeout));
        Self {
            store: session::new_store(),
            config,
            events,
        }
    }
}

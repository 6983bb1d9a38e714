use std::time::Duration;

use serde::Serialize;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_EVENTS_TIMEOUT_SECS: u64 = 5;
const MIN_SESSION_KEY_LEN: usize = 64;
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Whether an in-progress card stack may be replaced by a newer feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Keep the current stack.
    Never,
    /// Replace only if no card has been accepted or skipped yet.
    #[default]
    WhenUntouched,
    /// Always replace. Accepted to-dos are kept.
    Always,
}

impl ResetPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "never" => Some(ResetPolicy::Never),
            "when_untouched" | "untouched" => Some(ResetPolicy::WhenUntouched),
            "always" => Some(ResetPolicy::Always),
            _ => None,
        }
    }

    pub fn allows(&self, untouched: bool) -> bool {
        match self {
            ResetPolicy::Never => false,
            ResetPolicy::WhenUntouched => untouched,
            ResetPolicy::Always => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Raw session key material, present only when long enough to use.
    pub session_key: Option<String>,
    pub events_api_url: Option<String>,
    pub events_timeout: Duration,
    pub remote_reset: ResetPolicy,
    pub profile_edit_reset: ResetPolicy,
    /// Feed sessions older than this are dropped from the store.
    pub session_ttl: chrono::Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_key: None,
            events_api_url: None,
            events_timeout: Duration::from_secs(DEFAULT_EVENTS_TIMEOUT_SECS),
            remote_reset: ResetPolicy::default(),
            profile_edit_reset: ResetPolicy::default(),
            session_ttl: chrono::Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }
}

fn policy_from(name: &str, raw: Option<String>) -> ResetPolicy {
    match raw {
        None => ResetPolicy::default(),
        Some(v) => ResetPolicy::parse(&v).unwrap_or_else(|| {
            log::warn!("Unknown {name} '{v}', using {:?}", ResetPolicy::default());
            ResetPolicy::default()
        }),
    }
}

impl AppConfig {
    /// Load from the process environment (after `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let session_key = match get("SESSION_KEY") {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => Some(val),
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {}+); generating random key",
                    val.len(),
                    MIN_SESSION_KEY_LEN
                );
                None
            }
            None => {
                log::warn!("No SESSION_KEY set; generating random key (sessions lost on restart)");
                None
            }
        };

        let events_timeout = get("EVENTS_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.events_timeout);

        let session_ttl = get("SESSION_TTL_HOURS")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .map(chrono::Duration::hours)
            .unwrap_or(defaults.session_ttl);

        Self {
            bind_addr: get("BIND_ADDR")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            session_key,
            events_api_url: get("EVENTS_API_URL").filter(|v| !v.trim().is_empty()),
            events_timeout,
            remote_reset: policy_from("REMOTE_RESET_POLICY", get("REMOTE_RESET_POLICY")),
            profile_edit_reset: policy_from("PROFILE_EDIT_RESET_POLICY", get("PROFILE_EDIT_RESET_POLICY")),
            session_ttl,
        }
    }
}
